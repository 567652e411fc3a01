//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CatalogSource、KeyValueStore、AudioProvider、ExplorerEvents）
//! - services: Store、收藏、试听、分页、防抖以及组合它们的 VoiceExplorer
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;

pub use ports::{
    // Audio provider
    AcquiredAudio,
    AudioError,
    AudioEvent,
    AudioHandle,
    AudioProviderPort,
    // Catalog source
    CatalogError,
    CatalogSourcePort,
    // Explorer events
    ExplorerEvent,
    ExplorerEventsPort,
    // Key-value store
    KeyValueStorePort,
    StoreError,
    FAVORITES_KEY,
    VIEW_MODE_KEY,
};

pub use services::{
    ExplorerPorts, ExplorerSettings, ExplorerSnapshot, LoadOutcome, PaginationSnapshot,
    PreviewError, PreviewOutcome, VoiceExplorer,
};
