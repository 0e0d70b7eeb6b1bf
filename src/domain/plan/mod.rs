//! Plan Context - 章节规划限界上下文
//!
//! 职责:
//! - 按总集数、单集时长、付费卡点位置计算章节规划
//! - 章节与剧集区间的分配（开篇 / 发展 / 付费卡点 / 高潮 / 结局）
//! - 提供给提示词构建的规划变量

mod aggregate;
mod entities;
mod errors;
mod planner;
mod value_objects;

pub use aggregate::{ChapterPlan, PromptVariables};
pub use entities::ChapterPlanEntry;
pub use errors::PlanError;
pub use planner::{plan, plan_with_config, PlannerConfig, WORDS_PER_MINUTE};
pub use value_objects::{EpisodeSpan, PaywallEpisodes, Stage, DEFAULT_PAYWALL_EPISODE};
