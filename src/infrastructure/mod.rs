//! Infrastructure Layer - 基础设施层
//!
//! 端口的具体实现与对外的 HTTP / WebSocket 接口

pub mod adapters;
pub mod events;
pub mod http;
pub mod memory;
pub mod persistence;

pub use events::EventPublisher;
pub use memory::InMemoryKeyValueStore;
pub use persistence::SledKeyValueStore;
