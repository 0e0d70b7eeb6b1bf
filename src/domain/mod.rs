//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Plan Context: 章节规划
//! - Skeleton Context: 骨架文档解析
//! - Outline Context: 编译产物（大纲聚合）

pub mod outline;
pub mod plan;
pub mod skeleton;

