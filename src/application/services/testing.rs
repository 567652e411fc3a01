//! 服务层测试替身

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{mpsc, Semaphore};

use crate::application::ports::{
    AcquiredAudio, AudioError, AudioEvent, AudioHandle, AudioProviderPort, CatalogError,
    CatalogSourcePort, ExplorerEvent, ExplorerEventsPort, KeyValueStorePort, StoreError,
};
use crate::domain::voice::Voice;

// ============================================================================
// Key-Value Store
// ============================================================================

#[derive(Default)]
pub struct TestKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl TestKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStorePort for TestKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::DatabaseError("read refused".to_string()));
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::DatabaseError("disk full".to_string()));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}

// ============================================================================
// Explorer Events
// ============================================================================

#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<ExplorerEvent>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExplorerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// 仅保留试听会话事件
    pub fn preview_states(&self) -> Vec<crate::domain::PreviewSession> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ExplorerEvent::PreviewChanged(session) => Some(session),
                _ => None,
            })
            .collect()
    }
}

impl ExplorerEventsPort for RecordingEvents {
    fn publish(&self, event: ExplorerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================================================
// Audio Provider
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    Acquire(String),
    Play(AudioHandle),
    Pause(AudioHandle),
    Release(AudioHandle),
}

/// 可脚本化的音频提供者
///
/// `auto_load` 为真时 acquire 后立即发送 Loaded；否则由测试调用 `emit`。
/// `hang_uri` 登记的 uri 其 acquire 永不完成
pub struct ScriptedAudioProvider {
    auto_load: AtomicBool,
    next_handle: AtomicU64,
    failing_uris: Mutex<HashSet<String>>,
    hanging_uris: Mutex<HashSet<String>>,
    fail_play: AtomicBool,
    senders: Mutex<HashMap<AudioHandle, mpsc::UnboundedSender<AudioEvent>>>,
    live: Mutex<HashSet<AudioHandle>>,
    max_live: AtomicUsize,
    calls: Mutex<Vec<AudioCall>>,
}

impl ScriptedAudioProvider {
    pub fn new(auto_load: bool) -> Self {
        Self {
            auto_load: AtomicBool::new(auto_load),
            next_handle: AtomicU64::new(1),
            failing_uris: Mutex::new(HashSet::new()),
            hanging_uris: Mutex::new(HashSet::new()),
            fail_play: AtomicBool::new(false),
            senders: Mutex::new(HashMap::new()),
            live: Mutex::new(HashSet::new()),
            max_live: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_uri(&self, uri: &str) {
        self.failing_uris.lock().unwrap().insert(uri.to_string());
    }

    pub fn hang_uri(&self, uri: &str) {
        self.hanging_uris.lock().unwrap().insert(uri.to_string());
    }

    pub fn fail_play(&self, fail: bool) {
        self.fail_play.store(fail, Ordering::SeqCst);
    }

    pub fn emit(&self, handle: AudioHandle, event: AudioEvent) {
        if let Some(tx) = self.senders.lock().unwrap().get(&handle) {
            let _ = tx.send(event);
        }
    }

    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn acquired(&self) -> Vec<AudioHandle> {
        let mut handles: Vec<AudioHandle> = self.senders.lock().unwrap().keys().copied().collect();
        handles.sort_by_key(|h| h.raw());
        handles
    }

    pub fn live_handles(&self) -> usize {
        self.live.lock().unwrap().len()
    }

    pub fn max_live_handles(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    fn record(&self, call: AudioCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AudioProviderPort for ScriptedAudioProvider {
    async fn acquire(&self, uri: &str) -> Result<AcquiredAudio, AudioError> {
        self.record(AudioCall::Acquire(uri.to_string()));
        let hangs = self.hanging_uris.lock().unwrap().contains(uri);
        if hangs {
            std::future::pending::<()>().await;
        }
        if self.failing_uris.lock().unwrap().contains(uri) {
            return Err(AudioError::Unavailable(format!("cannot open {}", uri)));
        }

        let handle = AudioHandle::new(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let (tx, events) = mpsc::unbounded_channel();
        if self.auto_load.load(Ordering::SeqCst) {
            let _ = tx.send(AudioEvent::Loaded);
        }
        self.senders.lock().unwrap().insert(handle, tx);

        let live = {
            let mut live = self.live.lock().unwrap();
            live.insert(handle);
            live.len()
        };
        self.max_live.fetch_max(live, Ordering::SeqCst);

        Ok(AcquiredAudio { handle, events })
    }

    async fn play(&self, handle: AudioHandle) -> Result<(), AudioError> {
        self.record(AudioCall::Play(handle));
        if self.fail_play.load(Ordering::SeqCst) {
            return Err(AudioError::PlaybackFailed("autoplay blocked".to_string()));
        }
        Ok(())
    }

    async fn pause(&self, handle: AudioHandle) -> Result<(), AudioError> {
        self.record(AudioCall::Pause(handle));
        Ok(())
    }

    async fn release(&self, handle: AudioHandle) {
        self.record(AudioCall::Release(handle));
        self.live.lock().unwrap().remove(&handle);
    }
}

// ============================================================================
// Catalog Source
// ============================================================================

/// 按页脚本化的目录源
///
/// 门控打开前所有请求挂起，可用于观察 loading 期间的行为
pub struct GatedCatalogSource {
    pages: Mutex<HashMap<u32, Result<Vec<Voice>, CatalogError>>>,
    gate: Semaphore,
    requests: Mutex<Vec<u32>>,
}

impl GatedCatalogSource {
    /// 门控常开
    pub fn open() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 门控关闭，调用 `release` 放行
    pub fn closed() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            gate: Semaphore::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(self, page: u32, voices: Vec<Voice>) -> Self {
        self.set_page(page, Ok(voices));
        self
    }

    pub fn set_page(&self, page: u32, result: Result<Vec<Voice>, CatalogError>) {
        self.pages.lock().unwrap().insert(page, result);
    }

    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSourcePort for GatedCatalogSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Voice>, CatalogError> {
        self.requests.lock().unwrap().push(page);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;
        permit.forget();

        self.pages
            .lock()
            .unwrap()
            .get(&page)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// V1 4.5/100, V2 3.0/500, V3 5.0/10，均带试听地址
pub fn sample_voices() -> Vec<Voice> {
    vec![
        Voice::new("V1", "Emma_en-US")
            .with_rating(4.5)
            .with_usage_count(100)
            .with_sample_uri("https://cdn.test/v1.mp3"),
        Voice::new("V2", "Liam_en-GB")
            .with_rating(3.0)
            .with_usage_count(500)
            .with_sample_uri("https://cdn.test/v2.mp3"),
        Voice::new("V3", "Sofia_es-ES")
            .with_rating(5.0)
            .with_usage_count(10)
            .with_sample_uri("https://cdn.test/v3.mp3"),
    ]
}

/// 生成 `count` 条编号从 `start` 开始的记录
pub fn numbered_voices(start: usize, count: usize) -> Vec<Voice> {
    (start..start + count)
        .map(|i| Voice::new(format!("voice-{}", i), format!("Voice {}", i)).with_rating(3.0))
        .collect()
}
