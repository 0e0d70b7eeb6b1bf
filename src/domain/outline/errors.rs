//! Outline Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("剧集顺序错误: 第{previous}集之后出现第{current}集")]
    EpisodeOrder { previous: u32, current: u32 },

    #[error("剧集编号重复: 第{0}集")]
    DuplicateEpisode(u32),

    #[error("剧集总数不一致: 记录 {recorded}, 实际 {actual}")]
    TotalMismatch { recorded: u32, actual: usize },
}
