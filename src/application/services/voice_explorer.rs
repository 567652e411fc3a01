//! Voice Explorer - UI 层唯一交互对象
//!
//! 把每个命令路由到对应的组件：
//! - 查询输入 → VoiceCatalogStore（搜索经 Debouncer 合并）
//! - 收藏 → FavoritesLedger，并同步快照到 Store
//! - 试听 → PreviewCoordinator
//! - 分页 → PaginationController

use std::sync::Arc;
use std::time::Duration;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioProviderPort, CatalogSourcePort, ExplorerEvent, ExplorerEventsPort, KeyValueStorePort,
    VIEW_MODE_KEY,
};
use crate::application::services::{
    Debouncer, FavoritesLedger, LoadOutcome, PaginationController, PaginationSnapshot,
    PreviewCoordinator, PreviewOutcome, SharedCatalogStore, VoiceCatalogStore,
};
use crate::domain::query::{
    filter_options, FilterOptions, FilterPatch, QueryInput, SortDirection, SortField, SortSpec,
    ViewMode, VisibleVoice,
};
use crate::domain::voice::{Voice, VoiceId};
use crate::domain::{PreviewFailure, PreviewSession};

/// Explorer 运行参数
#[derive(Debug, Clone)]
pub struct ExplorerSettings {
    /// 搜索防抖静默期
    pub search_debounce: Duration,
    /// 试听加载超时，`None` 为不限制
    pub preview_load_timeout: Option<Duration>,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            preview_load_timeout: Some(Duration::from_secs(10)),
        }
    }
}

/// 外部依赖
pub struct ExplorerPorts {
    pub catalog: Arc<dyn CatalogSourcePort>,
    pub store: Arc<dyn KeyValueStorePort>,
    pub audio: Arc<dyn AudioProviderPort>,
    pub events: Arc<dyn ExplorerEventsPort>,
}

/// UI 读取的完整状态快照
#[derive(Debug, Clone)]
pub struct ExplorerSnapshot {
    pub visible: Vec<VisibleVoice>,
    pub catalog_size: usize,
    pub input: QueryInput,
    pub pending_search: Option<String>,
    pub pagination: PaginationSnapshot,
    pub preview: PreviewSession,
    pub last_preview_failure: Option<PreviewFailure>,
    pub favorites_count: usize,
}

impl ExplorerSnapshot {
    pub fn view_mode(&self) -> ViewMode {
        self.input.view_mode
    }
}

/// Voice Explorer
pub struct VoiceExplorer {
    store: SharedCatalogStore,
    favorites: FavoritesLedger,
    preview: PreviewCoordinator,
    pagination: PaginationController,
    search: Debouncer<String>,
    kv: Arc<dyn KeyValueStorePort>,
    events: Arc<dyn ExplorerEventsPort>,
}

impl VoiceExplorer {
    /// 恢复持久化状态（收藏、视图模式）并组装各组件
    ///
    /// 不会自动拉取目录，调用方随后调用 `load_initial`
    pub async fn start(settings: ExplorerSettings, ports: ExplorerPorts) -> Self {
        let ExplorerPorts {
            catalog,
            store: kv,
            audio,
            events,
        } = ports;

        let favorites = FavoritesLedger::load(kv.clone()).await;
        let view_mode = load_view_mode(kv.as_ref()).await;

        let mut catalog_store = VoiceCatalogStore::new();
        catalog_store.observe_favorites(favorites.current());
        catalog_store.set_view_mode(view_mode);
        let store = catalog_store.shared();

        let search = {
            let store = store.clone();
            let events = events.clone();
            Debouncer::spawn(settings.search_debounce, move |text: String| {
                let store = store.clone();
                let events = events.clone();
                async move {
                    let mut store = store.write().await;
                    if store.commit_search(&text) {
                        tracing::debug!(search = %text, "Search applied");
                        events.publish(store.visible_changed());
                    }
                }
            })
        };

        let preview = PreviewCoordinator::new(audio, events.clone(), settings.preview_load_timeout);
        let pagination = PaginationController::new(catalog, store.clone(), events.clone());

        tracing::info!(
            favorites = favorites.current().len(),
            view_mode = view_mode.as_str(),
            debounce_ms = settings.search_debounce.as_millis() as u64,
            "Voice explorer started"
        );

        Self {
            store,
            favorites,
            preview,
            pagination,
            search,
            kv,
            events,
        }
    }

    // ========================================================================
    // 读取
    // ========================================================================

    pub async fn snapshot(&self) -> ExplorerSnapshot {
        let store = self.store.read().await;
        ExplorerSnapshot {
            visible: store.visible().to_vec(),
            catalog_size: store.catalog().len(),
            input: store.input().clone(),
            pending_search: store.pending_search().map(str::to_string),
            pagination: self.pagination.snapshot(),
            preview: self.preview.session(),
            last_preview_failure: self.preview.last_failure(),
            favorites_count: store.favorites().len(),
        }
    }

    pub async fn voice(&self, voice_id: &VoiceId) -> Option<Arc<Voice>> {
        self.store.read().await.find(voice_id)
    }

    pub async fn filter_options(&self) -> FilterOptions {
        filter_options(self.store.read().await.catalog())
    }

    pub fn preview_session(&self) -> PreviewSession {
        self.preview.session()
    }

    pub fn pagination(&self) -> PaginationSnapshot {
        self.pagination.snapshot()
    }

    // ========================================================================
    // 查询输入
    // ========================================================================

    /// 记录搜索文本，静默期后才生效
    ///
    /// 持有写锁时入队，防抖器收到的顺序与暂存顺序一致
    pub async fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mut store = self.store.write().await;
        store.stage_search(text.clone());
        self.search.push(text);
    }

    pub async fn update_filters(&self, patch: FilterPatch) {
        let mut store = self.store.write().await;
        store.update_filters(patch);
        tracing::debug!(active = store.input().filters.active_count(), "Filters updated");
        self.events.publish(store.visible_changed());
    }

    /// 清空筛选与搜索，并取消待生效的搜索
    pub async fn clear_filters(&self) {
        self.search.cancel();
        let mut store = self.store.write().await;
        store.clear_filters();
        self.events.publish(store.visible_changed());
    }

    pub async fn set_sort(&self, field: SortField, direction: SortDirection) {
        let mut store = self.store.write().await;
        store.set_sort(SortSpec::new(field, direction));
        self.events.publish(store.visible_changed());
    }

    /// 修改视图模式并在后台持久化，失败只记录日志
    pub async fn set_view_mode(&self, view_mode: ViewMode) {
        self.store.write().await.set_view_mode(view_mode);
        self.events.publish(ExplorerEvent::ViewModeChanged { view_mode });

        let kv = self.kv.clone();
        tokio::spawn(async move {
            if let Err(e) = kv
                .set(VIEW_MODE_KEY, view_mode.as_str().as_bytes().to_vec())
                .await
            {
                tracing::warn!(error = %e, "Failed to persist view mode");
            }
        });
    }

    // ========================================================================
    // 收藏
    // ========================================================================

    /// 翻转收藏状态，返回翻转后是否已收藏
    pub async fn toggle_favorite(&self, voice_id: &VoiceId) -> bool {
        let mut store = self.store.write().await;
        let favorites = self.favorites.toggle(voice_id);
        let is_favorite = favorites.contains(voice_id);
        let total = favorites.len();
        store.observe_favorites(favorites);

        self.events.publish(ExplorerEvent::FavoriteToggled {
            voice_id: voice_id.clone(),
            is_favorite,
            total,
        });
        self.events.publish(store.visible_changed());
        is_favorite
    }

    // ========================================================================
    // 试听
    // ========================================================================

    /// 试听目录中的音色；同一音色再次调用即停止
    pub async fn preview(&self, voice_id: &VoiceId) -> Result<PreviewOutcome, ApplicationError> {
        let voice = self
            .voice(voice_id)
            .await
            .ok_or_else(|| ApplicationError::UnknownVoice(voice_id.clone()))?;

        let outcome = self
            .preview
            .preview(voice_id.clone(), voice.sample_uri())
            .await?;
        Ok(outcome)
    }

    pub async fn stop_preview(&self) -> bool {
        self.preview.stop().await
    }

    // ========================================================================
    // 分页
    // ========================================================================

    pub async fn load_initial(&self) -> LoadOutcome {
        self.pagination.load_initial().await
    }

    pub async fn load_more(&self) -> LoadOutcome {
        self.pagination.load_more().await
    }

    pub fn clear_error(&self) {
        self.pagination.clear_error();
    }

    // ========================================================================
    // 生命周期
    // ========================================================================

    /// 取消待生效的搜索、释放试听资源、等待收藏写入完成
    pub async fn shutdown(&self) {
        self.search.cancel();
        self.preview.shutdown().await;
        self.favorites.flush().await;
        tracing::info!("Voice explorer shut down");
    }
}

async fn load_view_mode(kv: &dyn KeyValueStorePort) -> ViewMode {
    match kv.get(VIEW_MODE_KEY).await {
        Ok(Some(bytes)) => match String::from_utf8_lossy(&bytes).parse::<ViewMode>() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring stored view mode");
                ViewMode::default()
            }
        },
        Ok(None) => ViewMode::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read view mode");
            ViewMode::default()
        }
    }
}
