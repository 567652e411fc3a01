//! Key-Value Store Port - 持久化键值存储
//!
//! 仅用于收藏集合与视图模式偏好，值的序列化格式由调用方决定

use async_trait::async_trait;
use thiserror::Error;

/// 收藏集合的存储 key
pub const FAVORITES_KEY: &str = "voice-favorites";

/// 视图模式偏好的存储 key
pub const VIEW_MODE_KEY: &str = "voice-explorer-view-mode";

/// Key-Value Store 错误
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Key-Value Store Port
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// 读取 key，不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// 写入 key（覆盖）
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}
