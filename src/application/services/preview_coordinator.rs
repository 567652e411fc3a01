//! Preview Coordinator - 单实例试听
//!
//! 状态机:
//!
//! ```text
//! idle ──preview(A)──▶ loading(A) ──Loaded──▶ playing(A) ──Ended──▶ idle
//!                         │                       │
//!                         ├── stop / preview(A) / preview(B) ──▶ idle (B: loading(B))
//!                         └── 失败 / 超时 ──▶ error(A) ──▶ idle
//! ```
//!
//! 协调器是音频资源的唯一持有者，任意时刻最多持有一个句柄；
//! 每条退出路径（停止、切换、失败、超时、关闭）都会 pause + release。

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    AcquiredAudio, AudioError, AudioEvent, AudioHandle, AudioProviderPort, ExplorerEvent,
    ExplorerEventsPort,
};
use crate::domain::voice::VoiceId;
use crate::domain::{PreviewFailure, PreviewSession};

/// 试听错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreviewError {
    #[error("Voice {0} has no preview sample")]
    NoSample(VoiceId),

    #[error("Preview of {voice_id} failed: {source}")]
    Audio {
        voice_id: VoiceId,
        source: AudioError,
    },

    #[error("Preview of {voice_id} did not load within {timeout_ms} ms")]
    LoadTimeout { voice_id: VoiceId, timeout_ms: u64 },

    #[error("Preview coordinator has shut down")]
    ShutDown,
}

/// `preview` 调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// 已开始播放
    Started,
    /// 同一音色再次触发，已停止
    Stopped,
    /// 加载期间被 stop 或其他音色取代
    Superseded,
}

/// 当前试听；`handle` 在 acquire 完成前为空
struct ActivePreview {
    voice_id: VoiceId,
    generation: u64,
    handle: Option<AudioHandle>,
    cancel: CancellationToken,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    active: Option<ActivePreview>,
    shut_down: bool,
}

struct Shared {
    audio: Arc<dyn AudioProviderPort>,
    events: Arc<dyn ExplorerEventsPort>,
    load_timeout: Option<Duration>,
    slot: Mutex<Slot>,
    session: watch::Sender<PreviewSession>,
    last_failure: watch::Sender<Option<PreviewFailure>>,
}

/// 试听协调器
#[derive(Clone)]
pub struct PreviewCoordinator {
    shared: Arc<Shared>,
}

impl PreviewCoordinator {
    /// `load_timeout` 为 `None` 时不限制加载时长
    pub fn new(
        audio: Arc<dyn AudioProviderPort>,
        events: Arc<dyn ExplorerEventsPort>,
        load_timeout: Option<Duration>,
    ) -> Self {
        let (session, _) = watch::channel(PreviewSession::idle());
        let (last_failure, _) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                audio,
                events,
                load_timeout,
                slot: Mutex::new(Slot::default()),
                session,
                last_failure,
            }),
        }
    }

    /// 当前会话快照
    pub fn session(&self) -> PreviewSession {
        self.shared.session.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewSession> {
        self.shared.session.subscribe()
    }

    /// 最近一次失败，下一次 preview 时清除
    pub fn last_failure(&self) -> Option<PreviewFailure> {
        self.shared.last_failure.borrow().clone()
    }

    /// 试听指定音色
    ///
    /// 同一音色正在加载或播放时视为停止；其他音色的资源先完整释放再加载新的。
    /// 返回时已进入 playing，或已回到 idle。
    pub async fn preview(
        &self,
        voice_id: VoiceId,
        sample_uri: Option<&str>,
    ) -> Result<PreviewOutcome, PreviewError> {
        let shared = &self.shared;

        let (generation, deadline, cancel, uri) = {
            let mut slot = shared.slot.lock().await;
            if slot.shut_down {
                return Err(PreviewError::ShutDown);
            }

            if let Some(previous) = slot.active.take() {
                let same_voice = previous.voice_id == voice_id;
                shared.teardown(previous).await;
                if same_voice {
                    tracing::debug!(voice_id = %voice_id, "Preview toggled off");
                    shared.set_session(PreviewSession::idle());
                    return Ok(PreviewOutcome::Stopped);
                }
            }

            shared.last_failure.send_replace(None);

            let Some(uri) = sample_uri else {
                let error = PreviewError::NoSample(voice_id.clone());
                shared.surface_failure(&voice_id, &error);
                return Err(error);
            };

            // 先占位，acquire 在锁外进行
            slot.generation += 1;
            let generation = slot.generation;
            let cancel = CancellationToken::new();
            slot.active = Some(ActivePreview {
                voice_id: voice_id.clone(),
                generation,
                handle: None,
                cancel: cancel.clone(),
            });
            shared.set_session(PreviewSession::loading(voice_id.clone()));
            tracing::debug!(voice_id = %voice_id, uri = %uri, generation, "Preview loading");

            let deadline = shared
                .load_timeout
                .and_then(|t| Instant::now().checked_add(t));
            (generation, deadline, cancel, uri)
        };

        let acquired = tokio::select! {
            _ = cancel.cancelled() => return Ok(PreviewOutcome::Superseded),
            acquired = within(deadline, shared.audio.acquire(uri)) => acquired,
        };

        let AcquiredAudio { handle, mut events } = match acquired {
            Ok(Ok(acquired)) => acquired,
            Ok(Err(source)) => {
                let error = PreviewError::Audio {
                    voice_id: voice_id.clone(),
                    source,
                };
                return shared.fail(generation, &voice_id, error).await;
            }
            Err(_) => {
                let error = shared.timeout_error(&voice_id);
                return shared.fail(generation, &voice_id, error).await;
            }
        };

        {
            let mut slot = shared.slot.lock().await;
            match slot.active.as_mut() {
                Some(active) if active.generation == generation => active.handle = Some(handle),
                _ => {
                    drop(slot);
                    tracing::debug!(voice_id = %voice_id, handle = %handle, "Late handle released");
                    shared.audio.release(handle).await;
                    return Ok(PreviewOutcome::Superseded);
                }
            }
        }

        let loaded = tokio::select! {
            _ = cancel.cancelled() => return Ok(PreviewOutcome::Superseded),
            loaded = within(deadline, wait_loaded(&mut events)) => loaded,
        };

        match loaded {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                let error = PreviewError::Audio {
                    voice_id: voice_id.clone(),
                    source,
                };
                return shared.fail(generation, &voice_id, error).await;
            }
            Err(_) => {
                let error = shared.timeout_error(&voice_id);
                return shared.fail(generation, &voice_id, error).await;
            }
        }

        {
            let slot = shared.slot.lock().await;
            if !slot.is_current(generation) {
                return Ok(PreviewOutcome::Superseded);
            }
            if let Err(source) = shared.audio.play(handle).await {
                drop(slot);
                let error = PreviewError::Audio {
                    voice_id: voice_id.clone(),
                    source,
                };
                return shared.fail(generation, &voice_id, error).await;
            }
            shared.set_session(PreviewSession::playing(voice_id.clone()));
        }

        tracing::info!(voice_id = %voice_id, handle = %handle, "Preview playing");
        tokio::spawn(watch_playback(
            Arc::clone(shared),
            generation,
            voice_id,
            events,
            cancel,
        ));

        Ok(PreviewOutcome::Started)
    }

    /// 停止当前试听；返回是否确实停止了某个试听
    pub async fn stop(&self) -> bool {
        let mut slot = self.shared.slot.lock().await;
        match slot.active.take() {
            Some(active) => {
                tracing::debug!(voice_id = %active.voice_id, "Preview stopped");
                self.shared.teardown(active).await;
                self.shared.set_session(PreviewSession::idle());
                true
            }
            None => false,
        }
    }

    /// 释放资源并拒绝后续的 preview
    pub async fn shutdown(&self) {
        let mut slot = self.shared.slot.lock().await;
        slot.shut_down = true;
        if let Some(active) = slot.active.take() {
            self.shared.teardown(active).await;
            self.shared.set_session(PreviewSession::idle());
        }
        tracing::info!("Preview coordinator shut down");
    }
}

impl Slot {
    fn is_current(&self, generation: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.generation == generation)
    }
}

impl Shared {
    fn set_session(&self, session: PreviewSession) {
        self.session.send_replace(session.clone());
        self.events.publish(ExplorerEvent::PreviewChanged(session));
    }

    /// error(voice) 后回到 idle
    fn surface_failure(&self, voice_id: &VoiceId, error: &PreviewError) {
        tracing::warn!(voice_id = %voice_id, error = %error, "Preview failed");
        let failed = PreviewSession::failed(voice_id.clone(), error.to_string());
        self.last_failure.send_replace(failed.failure().cloned());
        self.set_session(failed);
        self.set_session(PreviewSession::idle());
    }

    fn timeout_error(&self, voice_id: &VoiceId) -> PreviewError {
        PreviewError::LoadTimeout {
            voice_id: voice_id.clone(),
            timeout_ms: self
                .load_timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
                .unwrap_or_default(),
        }
    }

    async fn teardown(&self, active: ActivePreview) {
        active.cancel.cancel();
        let Some(handle) = active.handle else {
            return;
        };
        if let Err(e) = self.audio.pause(handle).await {
            tracing::debug!(handle = %handle, error = %e, "Pause before release failed");
        }
        self.audio.release(handle).await;
    }

    /// 仍是当前加载时释放资源并报告失败，否则视为已被取代
    async fn fail(
        &self,
        generation: u64,
        voice_id: &VoiceId,
        error: PreviewError,
    ) -> Result<PreviewOutcome, PreviewError> {
        let mut slot = self.slot.lock().await;
        if !slot.is_current(generation) {
            return Ok(PreviewOutcome::Superseded);
        }
        if let Some(active) = slot.active.take() {
            self.teardown(active).await;
        }
        self.surface_failure(voice_id, &error);
        Err(error)
    }

    /// 播放自然结束或出错后回到 idle
    async fn finish(&self, generation: u64, voice_id: &VoiceId, error: Option<PreviewError>) {
        let mut slot = self.slot.lock().await;
        if !slot.is_current(generation) {
            return;
        }
        if let Some(handle) = slot.active.take().and_then(|active| active.handle) {
            self.audio.release(handle).await;
        }
        match error {
            Some(error) => self.surface_failure(voice_id, &error),
            None => {
                tracing::debug!(voice_id = %voice_id, "Preview ended");
                self.set_session(PreviewSession::idle());
            }
        }
    }
}

/// 等待 Loaded 事件
async fn wait_loaded(events: &mut mpsc::UnboundedReceiver<AudioEvent>) -> Result<(), AudioError> {
    loop {
        match events.recv().await {
            Some(AudioEvent::Loaded) => return Ok(()),
            Some(AudioEvent::Ended) => continue,
            Some(AudioEvent::Errored(message)) => return Err(AudioError::Unavailable(message)),
            None => {
                return Err(AudioError::Unavailable(
                    "audio event stream closed".to_string(),
                ))
            }
        }
    }
}

/// 播放期间监听资源事件
async fn watch_playback(
    shared: Arc<Shared>,
    generation: u64,
    voice_id: VoiceId,
    mut events: mpsc::UnboundedReceiver<AudioEvent>,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return,
            event = events.recv() => event,
        };

        match event {
            Some(AudioEvent::Loaded) => continue,
            Some(AudioEvent::Ended) => {
                shared.finish(generation, &voice_id, None).await;
                return;
            }
            Some(AudioEvent::Errored(message)) => {
                let error = PreviewError::Audio {
                    voice_id: voice_id.clone(),
                    source: AudioError::PlaybackFailed(message),
                };
                shared.finish(generation, &voice_id, Some(error)).await;
                return;
            }
            None => {
                let error = PreviewError::Audio {
                    voice_id: voice_id.clone(),
                    source: AudioError::PlaybackFailed("audio event stream closed".to_string()),
                };
                shared.finish(generation, &voice_id, Some(error)).await;
                return;
            }
        }
    }
}

/// 可选截止时间
async fn within<F: Future>(
    deadline: Option<Instant>,
    fut: F,
) -> Result<F::Output, tokio::time::error::Elapsed> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, fut).await,
        None => Ok(fut.await),
    }
}
