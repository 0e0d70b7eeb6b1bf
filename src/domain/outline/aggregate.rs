//! Outline Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChapterMapEntry, Episode, JsonMetadata, OutlineError, PaywallInfo, StorySettings};

/// 大纲来源标记
pub const OUTLINE_SOURCE: &str = "skeleton";

/// 大纲元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineMetadata {
    pub chapter_map: Vec<ChapterMapEntry>,
    pub paywall_info: Option<PaywallInfo>,
    pub source: String,
    pub raw_markdown: String,
    pub story_settings: StorySettings,
}

/// OutlineData 聚合根
///
/// 不变量:
/// - episodes 按 episode_number 升序且不重复
/// - total_episodes == episodes.len()
/// - 构建完成后不可变，只能通过 OutlineBuilder 创建
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineData {
    project_id: String,
    episodes: Vec<Episode>,
    total_episodes: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    content: String,
    story_settings: StorySettings,
    metadata: OutlineMetadata,
}

impl OutlineData {
    // Getters
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes
            .binary_search_by_key(&episode_number, |e| e.episode_number)
            .ok()
            .map(|index| &self.episodes[index])
    }

    pub fn total_episodes(&self) -> u32 {
        self.total_episodes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn story_settings(&self) -> &StorySettings {
        &self.story_settings
    }

    pub fn metadata(&self) -> &OutlineMetadata {
        &self.metadata
    }

    /// 校验聚合不变量
    pub fn check_invariants(&self) -> Result<(), OutlineError> {
        for pair in self.episodes.windows(2) {
            let (previous, current) = (pair[0].episode_number, pair[1].episode_number);
            if previous == current {
                return Err(OutlineError::DuplicateEpisode(current));
            }
            if previous > current {
                return Err(OutlineError::EpisodeOrder { previous, current });
            }
        }
        if self.total_episodes as usize != self.episodes.len() {
            return Err(OutlineError::TotalMismatch {
                recorded: self.total_episodes,
                actual: self.episodes.len(),
            });
        }
        Ok(())
    }
}

/// OutlineData 构建器
///
/// 累积不可变记录，`build` 时一次性排序、去重，调用方观察不到中间状态
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    project_id: String,
    content: String,
    story_settings: StorySettings,
    metadata: JsonMetadata,
    episodes: Vec<Episode>,
    created_at: Option<DateTime<Utc>>,
}

impl OutlineBuilder {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            content: String::new(),
            story_settings: StorySettings::default(),
            metadata: JsonMetadata::default(),
            episodes: Vec::new(),
            created_at: None,
        }
    }

    pub fn content(mut self, markdown: impl Into<String>) -> Self {
        self.content = markdown.into();
        self
    }

    pub fn story_settings(mut self, settings: StorySettings) -> Self {
        self.story_settings = settings;
        self
    }

    pub fn metadata(mut self, metadata: JsonMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn episodes(mut self, episodes: impl IntoIterator<Item = Episode>) -> Self {
        self.episodes.extend(episodes);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn build(self) -> OutlineData {
        let mut episodes = self.episodes;
        episodes.sort_by_key(|e| e.episode_number);

        let before = episodes.len();
        episodes.dedup_by_key(|e| e.episode_number);
        if episodes.len() != before {
            tracing::warn!(
                project_id = %self.project_id,
                dropped = before - episodes.len(),
                "Duplicate episode numbers dropped"
            );
        }

        let now = self.created_at.unwrap_or_else(Utc::now);
        let outline = OutlineData {
            total_episodes: episodes.len() as u32,
            episodes,
            created_at: now,
            updated_at: now,
            metadata: OutlineMetadata {
                chapter_map: self.metadata.chapter_map,
                paywall_info: self.metadata.paywall_info,
                source: OUTLINE_SOURCE.to_string(),
                raw_markdown: self.content.clone(),
                story_settings: self.story_settings.clone(),
            },
            project_id: self.project_id,
            content: self.content,
            story_settings: self.story_settings,
        };
        debug_assert_eq!(outline.check_invariants(), Ok(()));

        outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outline::ReviewStatus;

    fn episode(number: u32, chapter: u32) -> Episode {
        Episode {
            episode_id: Episode::episode_id("p1", number),
            episode_number: number,
            title: format!("第{}章", chapter),
            summary: String::new(),
            content: String::new(),
            scenes: Vec::new(),
            review_status: ReviewStatus::Pending,
            is_paid_wall: false,
            chapter_number: chapter,
        }
    }

    #[test]
    fn test_build_sorts_episodes() {
        let outline = OutlineBuilder::new("p1")
            .episodes(vec![episode(3, 2), episode(1, 1), episode(2, 1)])
            .build();

        let numbers: Vec<u32> = outline.episodes().iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(outline.total_episodes(), 3);
        assert_eq!(outline.check_invariants(), Ok(()));
    }

    #[test]
    fn test_build_drops_duplicates_keeping_first() {
        let outline = OutlineBuilder::new("p1")
            .episodes(vec![episode(1, 1), episode(2, 1), episode(2, 5)])
            .build();

        assert_eq!(outline.total_episodes(), 2);
        assert_eq!(outline.episode(2).unwrap().chapter_number, 1);
    }

    #[test]
    fn test_metadata_mirrors_content() {
        let at = Utc::now();
        let outline = OutlineBuilder::new("p1")
            .content("# 大纲")
            .created_at(at)
            .build();

        assert_eq!(outline.metadata().source, OUTLINE_SOURCE);
        assert_eq!(outline.metadata().raw_markdown, "# 大纲");
        assert_eq!(outline.created_at(), at);
        assert_eq!(outline.updated_at(), at);
        assert!(outline.episodes().is_empty());
    }

    #[test]
    fn test_check_invariants_detects_total_mismatch() {
        let mut outline = OutlineBuilder::new("p1").episodes(vec![episode(1, 1)]).build();
        outline.total_episodes = 5;

        assert_eq!(
            outline.check_invariants(),
            Err(OutlineError::TotalMismatch {
                recorded: 5,
                actual: 1
            })
        );
    }
}
