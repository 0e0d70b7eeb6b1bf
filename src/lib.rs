//! Juben - 短剧大纲编译管线
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Plan Context: 章节规划（总集数 / 单集时长 / 付费卡点 → 章节表）
//! - Skeleton Context: 骨架 markdown 文档的容错解析
//! - Outline Context: 编译产物 OutlineData
//!
//! 应用层 (application/):
//! - Ports: 端口定义（OutlineStore）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - Memory: OutlineStore 内存实现
//! - Persistence: Sled 存储

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
