//! Voice Explorer - 音色发现与试听协调引擎
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录记录
//! - Query Context: 查询输入、可见列表派生、筛选面板选项
//! - Favorites / Preview: 收藏集合与试听会话
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CatalogSource, KeyValueStore, AudioProvider, ExplorerEvents）
//! - Services: Store、防抖、收藏账本、试听协调、分页控制与 VoiceExplorer 门面
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory / Persistence: 内存与 Sled 键值存储
//! - Adapters: HTTP / 假目录源，浏览器中继音频
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
