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

use super::types::AppConfig;

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
/// 1. 环境变量（前缀 `VOICE_EXPLORER_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICE_EXPLORER_SERVER__PORT=8080`
/// - `VOICE_EXPLORER_CATALOG__USE_FAKE=false`
/// - `VOICE_EXPLORER_CATALOG__URL=http://catalog:8080`
/// - `VOICE_EXPLORER_EXPLORER__SEARCH_DEBOUNCE_MS=500`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("catalog.url", "http://localhost:8080")?
        .set_default("catalog.timeout_secs", 30)?
        .set_default("catalog.use_fake", true)?
        .set_default("catalog.fake_pages", 3)?
        .set_default("catalog.fake_latency_ms", 0)?
        .set_default("storage.data_dir", "data")?
        .set_default("explorer.search_debounce_ms", 300)?
        .set_default("explorer.preview_load_timeout_ms", 10_000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("VOICE_EXPLORER")
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
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 真实目录源必须有地址
    if !config.catalog.use_fake && config.catalog.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Catalog URL cannot be empty unless catalog.use_fake is set".to_string(),
        ));
    }

    if config.storage.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Data directory cannot be empty".to_string(),
        ));
    }

    if config.explorer.search_debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Search debounce cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    if config.catalog.use_fake {
        tracing::info!(
            "Catalog: fake ({} pages, {}ms latency)",
            config.catalog.fake_pages,
            config.catalog.fake_latency_ms
        );
    } else {
        tracing::info!("Catalog URL: {}", config.catalog.url);
        tracing::info!("Catalog Timeout: {}s", config.catalog.timeout_secs);
    }
    tracing::info!("Data Directory: {:?}", config.storage.data_dir);
    tracing::info!("Search Debounce: {}ms", config.explorer.search_debounce_ms);
    match config.explorer.preview_load_timeout_ms {
        0 => tracing::info!("Preview Load Timeout: disabled"),
        ms => tracing::info!("Preview Load Timeout: {}ms", ms),
    }
    tracing::info!("Log Level: {} (json: {})", config.log.level, config.log.json);
    tracing::info!("=================================");
}
