//! Plan Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("总集数必须大于0: {0}")]
    InvalidTotalEpisodes(u32),

    #[error("单集时长必须大于0: {0}")]
    InvalidEpisodeDuration(u32),

    #[error("第{chapter}章起始集数不连续: 期望第{expected}集, 实际第{actual}集")]
    CoverageGap {
        chapter: u32,
        expected: u32,
        actual: u32,
    },

    #[error("章节编号不连续: 期望第{expected}章, 实际第{actual}章")]
    ChapterNumberGap { expected: u32, actual: u32 },

    #[error("章节覆盖不完整: 覆盖到第{covered}集, 总集数 {total}")]
    IncompleteCoverage { covered: u32, total: u32 },

    #[error("付费章节数量异常: {0}")]
    PaywallCount(usize),
}
