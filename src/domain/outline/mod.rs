//! Outline Context - 大纲限界上下文
//!
//! 职责:
//! - OutlineData 聚合（剧集、故事设定、元数据）
//! - 剧集 / 场景 / 角色 / 张力曲线实体
//! - 一次性排序校验的构建器

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::{OutlineBuilder, OutlineData, OutlineMetadata, OUTLINE_SOURCE};
pub use entities::{Character, Episode, Scene, TensionCurvePoint};
pub use errors::OutlineError;
pub use value_objects::{
    ChapterMapEntry, CharacterSection, JsonMetadata, PaywallInfo, ReviewStatus, SettingSection,
    StorySettings, TensionCurveSection,
};
