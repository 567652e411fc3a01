//! Voice Context - Errors

use thiserror::Error;

use super::VoiceId;

#[derive(Debug, Clone, Error)]
pub enum VoiceError {
    #[error("音色 ID 不能为空")]
    EmptyId,

    #[error("音色名称不能为空: {0}")]
    EmptyName(VoiceId),

    #[error("无效的评分 {rating} (音色 {id})，必须在 0 到 5 之间")]
    InvalidRating { id: VoiceId, rating: f64 },
}
