//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ExplorerSettings;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 目录源配置
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// Explorer 行为配置
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 目录源配置
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// 目录服务基础 URL
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,

    /// 使用内置的假目录（离线开发）
    #[serde(default = "default_use_fake")]
    pub use_fake: bool,

    /// 假目录的页数
    #[serde(default = "default_fake_pages")]
    pub fake_pages: u32,

    /// 假目录每页的模拟延迟（毫秒）
    #[serde(default)]
    pub fake_latency_ms: u64,
}

fn default_catalog_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_catalog_timeout() -> u64 {
    30
}

fn default_use_fake() -> bool {
    true
}

fn default_fake_pages() -> u32 {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_secs: default_catalog_timeout(),
            use_fake: default_use_fake(),
            fake_pages: default_fake_pages(),
            fake_latency_ms: 0,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 数据目录（收藏与视图模式的 sled 数据库位于其中）
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// sled 数据库路径
    pub fn prefs_db_path(&self) -> PathBuf {
        self.data_dir.join("prefs.sled")
    }
}

/// Explorer 行为配置
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    /// 搜索防抖静默期（毫秒）
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    /// 试听加载超时（毫秒），0 表示不限制
    #[serde(default = "default_preview_load_timeout")]
    pub preview_load_timeout_ms: u64,
}

fn default_search_debounce() -> u64 {
    300
}

fn default_preview_load_timeout() -> u64 {
    10_000
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce(),
            preview_load_timeout_ms: default_preview_load_timeout(),
        }
    }
}

impl ExplorerConfig {
    pub fn settings(&self) -> ExplorerSettings {
        ExplorerSettings {
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            preview_load_timeout: match self.preview_load_timeout_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
        assert!(config.catalog.use_fake);
        assert_eq!(config.catalog.fake_pages, 3);
        assert_eq!(config.explorer.search_debounce_ms, 300);
        assert_eq!(config.storage.prefs_db_path(), PathBuf::from("data/prefs.sled"));
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5060");
    }

    #[test]
    fn test_explorer_settings() {
        let settings = ExplorerConfig::default().settings();
        assert_eq!(settings.search_debounce, Duration::from_millis(300));
        assert_eq!(settings.preview_load_timeout, Some(Duration::from_secs(10)));

        let unlimited = ExplorerConfig {
            preview_load_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(unlimited.settings().preview_load_timeout, None);
    }
}
