//! Relay Audio Provider - 以浏览器作为音频设备
//!
//! 服务端只分配句柄并通过 WebSocket 下发 load/play/pause/release 指令；
//! 浏览器通过 `POST /api/preview/report` 回报 loaded/ended/errored。

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::ports::{
    AcquiredAudio, AudioError, AudioEvent, AudioHandle, AudioProviderPort,
};
use crate::infrastructure::events::{AudioInstruction, EventPublisher};

/// 浏览器回报的音频事件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClientAudioReport {
    Loaded,
    Ended,
    Errored { message: String },
}

impl From<ClientAudioReport> for AudioEvent {
    fn from(report: ClientAudioReport) -> Self {
        match report {
            ClientAudioReport::Loaded => AudioEvent::Loaded,
            ClientAudioReport::Ended => AudioEvent::Ended,
            ClientAudioReport::Errored { message } => AudioEvent::Errored(message),
        }
    }
}

/// 中继音频提供者
pub struct RelayAudioProvider {
    publisher: Arc<EventPublisher>,
    next_handle: AtomicU64,
    /// handle -> 该资源的事件发送端
    handles: DashMap<AudioHandle, mpsc::UnboundedSender<AudioEvent>>,
}

impl RelayAudioProvider {
    pub fn new(publisher: Arc<EventPublisher>) -> Self {
        Self {
            publisher,
            next_handle: AtomicU64::new(1),
            handles: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 存活的句柄数量
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    /// 接收浏览器回报
    pub fn report(&self, handle: AudioHandle, report: ClientAudioReport) -> Result<(), AudioError> {
        let sender = self
            .handles
            .get(&handle)
            .ok_or(AudioError::UnknownHandle(handle))?;

        tracing::debug!(handle = %handle, report = ?report, "Audio report received");
        sender
            .send(report.into())
            .map_err(|_| AudioError::UnknownHandle(handle))
    }

    fn ensure_live(&self, handle: AudioHandle) -> Result<(), AudioError> {
        if self.handles.contains_key(&handle) {
            Ok(())
        } else {
            Err(AudioError::UnknownHandle(handle))
        }
    }
}

#[async_trait]
impl AudioProviderPort for RelayAudioProvider {
    async fn acquire(&self, uri: &str) -> Result<AcquiredAudio, AudioError> {
        if self.publisher.subscriber_count() == 0 {
            return Err(AudioError::Unavailable(
                "no audio device connected".to_string(),
            ));
        }

        let handle = AudioHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let (tx, events) = mpsc::unbounded_channel();
        self.handles.insert(handle, tx);

        self.publisher.publish_audio(AudioInstruction::AudioLoad {
            handle: handle.raw(),
            uri: uri.to_string(),
        });
        tracing::debug!(handle = %handle, uri = %uri, "Audio acquired");

        Ok(AcquiredAudio { handle, events })
    }

    async fn play(&self, handle: AudioHandle) -> Result<(), AudioError> {
        self.ensure_live(handle)?;
        if self.publisher.publish_audio(AudioInstruction::AudioPlay {
            handle: handle.raw(),
        }) == 0
        {
            return Err(AudioError::PlaybackFailed(
                "audio device disconnected".to_string(),
            ));
        }
        Ok(())
    }

    async fn pause(&self, handle: AudioHandle) -> Result<(), AudioError> {
        self.ensure_live(handle)?;
        self.publisher.publish_audio(AudioInstruction::AudioPause {
            handle: handle.raw(),
        });
        Ok(())
    }

    async fn release(&self, handle: AudioHandle) {
        if self.handles.remove(&handle).is_some() {
            self.publisher.publish_audio(AudioInstruction::AudioRelease {
                handle: handle.raw(),
            });
            tracing::debug!(handle = %handle, "Audio released");
        }
    }
}
