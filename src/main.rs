//! Voice Explorer - 音色发现与试听服务
//!
//! 启动流程: 配置 → 日志 → 存储 / 目录源 / 事件 / 音频中继 → Explorer → HTTP

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use voice_explorer::application::{CatalogSourcePort, ExplorerPorts, VoiceExplorer};
use voice_explorer::config::{load_config, print_config, AppConfig, LogConfig};
use voice_explorer::infrastructure::adapters::{
    FakeCatalogSource, FakeCatalogSourceConfig, HttpCatalogSource, HttpCatalogSourceConfig,
    RelayAudioProvider,
};
use voice_explorer::infrastructure::events::EventPublisher;
use voice_explorer::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voice_explorer::infrastructure::persistence::SledKeyValueStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Voice Explorer - 音色发现与试听服务");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.data_dir).await?;

    let kv = SledKeyValueStore::open(config.storage.prefs_db_path())?.arc();

    let catalog = build_catalog(&config)?;

    // 事件发布器同时承载 Explorer 事件与音频指令
    let event_publisher = EventPublisher::new().arc();
    let audio = RelayAudioProvider::new(event_publisher.clone()).arc();

    let explorer = Arc::new(
        VoiceExplorer::start(
            config.explorer.settings(),
            ExplorerPorts {
                catalog,
                store: kv,
                audio: audio.clone(),
                events: event_publisher.clone(),
            },
        )
        .await,
    );

    // 首页加载失败不阻止启动，错误保存在分页状态中等待重试
    let initial = explorer.load_initial().await;
    tracing::info!(outcome = ?initial, "Initial catalog load finished");

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = Arc::new(AppState::new(explorer.clone(), audio, event_publisher));
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    explorer.shutdown().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},voice_explorer={},tower_http=debug",
        log.level, log.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_catalog(config: &AppConfig) -> anyhow::Result<Arc<dyn CatalogSourcePort>> {
    let catalog = &config.catalog;
    if catalog.use_fake {
        return Ok(Arc::new(FakeCatalogSource::new(FakeCatalogSourceConfig {
            pages: catalog.fake_pages,
            latency: Duration::from_millis(catalog.fake_latency_ms),
        })));
    }

    let source_config =
        HttpCatalogSourceConfig::new(&catalog.url).with_timeout(catalog.timeout_secs);
    Ok(Arc::new(HttpCatalogSource::new(source_config)?))
}
