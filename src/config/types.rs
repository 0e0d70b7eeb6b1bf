//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::plan::{PlannerConfig, DEFAULT_PAYWALL_EPISODE, WORDS_PER_MINUTE};
use crate::domain::skeleton::CharacterLimits;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 章节规划配置
    #[serde(default)]
    pub planner: PlannerSettings,

    /// 骨架解析配置
    #[serde(default)]
    pub parser: ParserConfig,

    /// 大纲存储配置
    #[serde(default)]
    pub store: StoreConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 章节规划配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSettings {
    /// 付费集数缺失或无效时的默认付费集
    #[serde(default = "default_paywall_episode")]
    pub default_paywall_episode: u32,

    /// 每分钟成片对应的字数
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u64,
}

fn default_paywall_episode() -> u32 {
    DEFAULT_PAYWALL_EPISODE
}

fn default_words_per_minute() -> u64 {
    WORDS_PER_MINUTE
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            default_paywall_episode: default_paywall_episode(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl PlannerSettings {
    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            default_paywall_episode: self.default_paywall_episode,
            words_per_minute: self.words_per_minute,
        }
    }
}

/// 骨架解析配置
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// 每份大纲最多角色数
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,

    /// 角色名最大字符数
    #[serde(default = "default_max_character_name_chars")]
    pub max_character_name_chars: usize,

    /// 角色描述最大字符数
    #[serde(default = "default_max_character_description_chars")]
    pub max_character_description_chars: usize,
}

fn default_max_characters() -> usize {
    15
}

fn default_max_character_name_chars() -> usize {
    50
}

fn default_max_character_description_chars() -> usize {
    1000
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_characters: default_max_characters(),
            max_character_name_chars: default_max_character_name_chars(),
            max_character_description_chars: default_max_character_description_chars(),
        }
    }
}

impl ParserConfig {
    pub fn character_limits(&self) -> CharacterLimits {
        CharacterLimits {
            max_characters: self.max_characters,
            max_name_chars: self.max_character_name_chars,
            max_description_chars: self.max_character_description_chars,
        }
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// 进程内存（进程退出即丢失）
    Memory,
    /// Sled 嵌入式数据库
    #[default]
    Sled,
}

/// 大纲存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Sled 数据库路径
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "data/outlines.sled".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
