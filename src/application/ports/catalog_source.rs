//! Catalog Source Port - 音色目录分页拉取
//!
//! 定义目录数据源的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::Voice;

/// Catalog Source 错误
///
/// 需要保存在分页状态中供 UI 重试，因此实现 Clone
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Catalog Source Port
///
/// 页码从 1 开始，返回空列表表示没有更多数据
#[async_trait]
pub trait CatalogSourcePort: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Voice>, CatalogError>;
}
