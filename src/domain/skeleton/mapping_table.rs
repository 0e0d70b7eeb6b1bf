//! 章节映射表
//!
//! 文档没有内嵌 JSON 时，从"章节-剧集映射"分区的 markdown 表格恢复章节映射

use super::sections::{cell_number, header_column, table_rows};
use crate::domain::outline::ChapterMapEntry;
use crate::domain::plan::EpisodeSpan;

const EPISODE_HEADER_KEYWORDS: [&str; 3] = ["集", "episode", "剧集"];

/// 解析映射表
///
/// 第一列为章节号；剧集列优先按表头定位（含"集"），否则取该行第一个可解析为区间的单元格。
/// 无法解析的行跳过
pub fn parse_chapter_map(markdown: &str) -> Vec<ChapterMapEntry> {
    let rows = table_rows(markdown);
    let Some(header) = rows.first() else {
        return Vec::new();
    };
    // 表头第一列若本身就是章节号，说明表格没有表头
    let (episode_column, data) = if cell_number(&header[0]).is_some() {
        (None, &rows[..])
    } else {
        (
            header_column(&header[1..], &EPISODE_HEADER_KEYWORDS).map(|i| i + 1),
            &rows[1..],
        )
    };

    data.iter()
        .filter_map(|row| {
            let chapter = cell_number(row.first()?)?;
            let span = match episode_column {
                Some(column) => row.get(column).and_then(|cell| EpisodeSpan::parse(cell)),
                None => row.iter().skip(1).find_map(|cell| EpisodeSpan::parse(cell)),
            };
            match span {
                Some(span) => Some(ChapterMapEntry {
                    chapter,
                    episodes: span.to_string(),
                }),
                None => {
                    tracing::warn!(chapter, "Mapping table row without episode range, skipped");
                    None
                }
            }
        })
        .collect()
}
