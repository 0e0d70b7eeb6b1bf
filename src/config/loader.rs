//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, StoreBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `JUBEN_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `JUBEN_PLANNER__DEFAULT_PAYWALL_EPISODE=10`
/// - `JUBEN_PARSER__MAX_CHARACTERS=20`
/// - `JUBEN_STORE__BACKEND=memory`
/// - `JUBEN_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("planner.default_paywall_episode", 12)?
        .set_default("planner.words_per_minute", 4000)?
        .set_default("parser.max_characters", 15)?
        .set_default("parser.max_character_name_chars", 50)?
        .set_default("parser.max_character_description_chars", 1000)?
        .set_default("store.backend", "sled")?
        .set_default("store.path", "data/outlines.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("JUBEN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.planner.default_paywall_episode == 0 {
        return Err(ConfigError::ValidationError(
            "Default paywall episode cannot be 0".to_string(),
        ));
    }

    if config.planner.words_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "Words per minute cannot be 0".to_string(),
        ));
    }

    let parser = &config.parser;
    if parser.max_characters == 0
        || parser.max_character_name_chars == 0
        || parser.max_character_description_chars == 0
    {
        return Err(ConfigError::ValidationError(
            "Parser limits cannot be 0".to_string(),
        ));
    }

    if config.store.backend == StoreBackend::Sled && config.store.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Store path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Default Paywall Episode: {}", config.planner.default_paywall_episode);
    tracing::info!("Words Per Minute: {}", config.planner.words_per_minute);
    tracing::info!("Max Characters: {}", config.parser.max_characters);
    tracing::info!("Store Backend: {:?}", config.store.backend);
    if config.store.backend == StoreBackend::Sled {
        tracing::info!("Store Path: {}", config.store.path);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
