//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_provider;
mod catalog_source;
mod explorer_events;
mod key_value_store;

pub use audio_provider::{AcquiredAudio, AudioError, AudioEvent, AudioHandle, AudioProviderPort};
pub use catalog_source::{CatalogError, CatalogSourcePort};
pub use explorer_events::{ExplorerEvent, ExplorerEventsPort};
pub use key_value_store::{KeyValueStorePort, StoreError, FAVORITES_KEY, VIEW_MODE_KEY};
