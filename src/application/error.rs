//! 应用层错误定义
//!
//! 统一的 Explorer 命令错误类型

use thiserror::Error;

use crate::application::ports::{CatalogError, StoreError};
use crate::application::services::PreviewError;
use crate::domain::voice::VoiceId;

/// 应用层错误
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// 目录中不存在该音色
    #[error("Voice not found: {0}")]
    UnknownVoice(VoiceId),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 目录拉取失败
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// 试听失败
    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    /// 持久化失败
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
