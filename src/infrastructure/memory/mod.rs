//! Memory Layer - In-Memory State Management
//!
//! 临时运行与测试使用的内存实现

mod kv_store;

pub use kv_store::InMemoryKeyValueStore;
