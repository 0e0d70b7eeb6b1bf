//! 剧集组装
//!
//! 把章节映射展开为逐集记录，同一映射条目下的多集共享一次提取的章节详情

use super::chapter_detail::ChapterIndex;
use crate::domain::outline::{ChapterMapEntry, Episode, PaywallInfo, ReviewStatus};
use crate::domain::plan::EpisodeSpan;

/// 组装剧集
///
/// - 区间无法解析的条目单独跳过，不影响其他条目
/// - 结果按 episode_number 升序，重复集数保留第一次出现
pub fn assemble(
    chapter_map: &[ChapterMapEntry],
    document: &str,
    project_id: &str,
    paywall_info: Option<&PaywallInfo>,
) -> Vec<Episode> {
    let index = ChapterIndex::scan(document);
    let paywall_chapter = paywall_info.and_then(|info| info.chapter);

    let mut episodes: Vec<Episode> = Vec::new();
    for entry in chapter_map {
        let Some(span) = EpisodeSpan::parse(&entry.episodes) else {
            tracing::warn!(
                chapter = entry.chapter,
                episodes = %entry.episodes,
                "Malformed episode range, entry skipped"
            );
            continue;
        };

        let detail = index.extract(document, entry.chapter);
        let summary = detail.summary.unwrap_or_default();
        let is_paid_wall = paywall_chapter == Some(entry.chapter);

        episodes.extend(span.episodes().map(|episode_number| Episode {
            episode_id: Episode::episode_id(project_id, episode_number),
            episode_number,
            title: detail.title.clone(),
            summary: summary.clone(),
            content: detail.content.clone(),
            scenes: detail.scenes.clone(),
            review_status: ReviewStatus::Pending,
            is_paid_wall,
            chapter_number: entry.chapter,
        }));
    }

    episodes.sort_by_key(|e| e.episode_number);
    episodes.dedup_by_key(|e| e.episode_number);
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
### Chapter 1: 开端
**摘要**：相遇
**场景清单**：
1. **街头**：偶遇

### Chapter 2: 卡点
**摘要**：身份揭晓
";

    fn entry(chapter: u32, episodes: &str) -> ChapterMapEntry {
        ChapterMapEntry {
            chapter,
            episodes: episodes.to_string(),
        }
    }

    fn paywall(chapter: u32) -> PaywallInfo {
        PaywallInfo {
            chapter: Some(chapter),
            ..Default::default()
        }
    }

    #[test]
    fn test_expands_ranges_and_flags_paywall() {
        let map = vec![entry(1, "1-3"), entry(2, "4")];
        let episodes = assemble(&map, DOC, "p1", Some(&paywall(2)));

        let numbers: Vec<u32> = episodes.iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let paid: Vec<u32> = episodes
            .iter()
            .filter(|e| e.is_paid_wall)
            .map(|e| e.episode_number)
            .collect();
        assert_eq!(paid, vec![4]);

        assert_eq!(episodes[0].episode_id, "ep_p1_1");
        assert_eq!(episodes[3].episode_id, "ep_p1_4");
    }

    #[test]
    fn test_episodes_share_chapter_detail() {
        let episodes = assemble(&[entry(1, "1-3")], DOC, "p1", None);

        for episode in &episodes {
            assert_eq!(episode.title, "开端");
            assert_eq!(episode.summary, "相遇");
            assert_eq!(episode.scenes.len(), 1);
            assert_eq!(episode.scenes[0].scene_id, "scene_ch1_1");
            assert_eq!(episode.review_status, ReviewStatus::Pending);
            assert!(!episode.is_paid_wall);
        }
    }

    #[test]
    fn test_sorted_regardless_of_map_order() {
        let map = vec![entry(2, "4"), entry(1, "1-3")];
        let episodes = assemble(&map, DOC, "p1", None);

        let numbers: Vec<u32> = episodes.iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_deterministic() {
        let map = vec![entry(1, "1-3"), entry(2, "4")];
        let first = serde_json::to_string(&assemble(&map, DOC, "p1", Some(&paywall(2)))).unwrap();
        let second = serde_json::to_string(&assemble(&map, DOC, "p1", Some(&paywall(2)))).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_range_skipped() {
        let map = vec![entry(1, "abc"), entry(2, "5-3"), entry(3, "6")];
        let episodes = assemble(&map, DOC, "p1", None);

        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].episode_number, 6);
        // 文档中没有第 3 章，使用默认标题
        assert_eq!(episodes[0].title, "第3章");
        assert!(episodes[0].content.is_empty());
    }

    #[test]
    fn test_missing_paywall_chapter_flags_nothing() {
        let info = PaywallInfo::default();
        let episodes = assemble(&[entry(1, "1-2")], DOC, "p1", Some(&info));

        assert!(episodes.iter().all(|e| !e.is_paid_wall));
    }
}
