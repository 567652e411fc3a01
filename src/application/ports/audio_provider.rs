//! Audio Provider Port - 试听音频资源
//!
//! 试听协调器是音频资源的唯一持有者。资源生命周期:
//!
//! ```text
//! acquire(uri) ──▶ events: Loaded ──play()──▶ events: Ended | Errored
//!                          └──────────────── Errored
//! pause() / release() 可在任意阶段调用
//! ```

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// 音频资源句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(u64);

impl AudioHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "audio#{}", self.0)
    }
}

/// 音频资源生命周期事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// 资源已可播放
    Loaded,
    /// 自然播放结束
    Ended,
    /// 加载或播放失败
    Errored(String),
}

/// acquire 的结果：句柄 + 该资源的事件流
#[derive(Debug)]
pub struct AcquiredAudio {
    pub handle: AudioHandle,
    pub events: mpsc::UnboundedReceiver<AudioEvent>,
}

/// Audio Provider 错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("Audio source unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown audio handle: {0}")]
    UnknownHandle(AudioHandle),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Audio Provider Port
#[async_trait]
pub trait AudioProviderPort: Send + Sync {
    /// 创建音频资源并开始加载
    async fn acquire(&self, uri: &str) -> Result<AcquiredAudio, AudioError>;

    /// 开始播放（需在 Loaded 之后调用）
    async fn play(&self, handle: AudioHandle) -> Result<(), AudioError>;

    /// 暂停播放
    async fn pause(&self, handle: AudioHandle) -> Result<(), AudioError>;

    /// 释放资源，之后句柄失效；对未知句柄无操作
    async fn release(&self, handle: AudioHandle);
}
