//! Pagination Controller - 目录分页加载
//!
//! `loading` 期间拒绝新的请求（单飞）；成功后合并到 Store 并重新计算可见列表，
//! 失败时保存错误、保留已加载的记录和 `has_more`，供用户重试。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::application::ports::{CatalogError, CatalogSourcePort, ExplorerEvent, ExplorerEventsPort};
use crate::application::services::SharedCatalogStore;
use crate::domain::voice::Voice;

/// 分页状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationSnapshot {
    /// 最后一个成功加载的非空页
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<CatalogError>,
}

impl Default for PaginationSnapshot {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: true,
            loading: false,
            error: None,
        }
    }
}

/// 一次加载的结果
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// 拉取到非空页，`added` 为去重后实际追加的数量
    Loaded { page: u32, added: usize },
    /// 拉取到空页，已无更多数据
    Exhausted,
    /// 拉取失败，错误已保存
    Failed(CatalogError),
    /// 正在加载或已无更多数据，未发出请求
    Skipped,
}

/// 分页控制器
pub struct PaginationController {
    source: Arc<dyn CatalogSourcePort>,
    store: SharedCatalogStore,
    events: Arc<dyn ExplorerEventsPort>,
    loading: AtomicBool,
    state: watch::Sender<PaginationSnapshot>,
}

/// 持有期间 `loading = true`；无论正常返回还是 future 被丢弃都会复位
struct LoadingGuard<'a> {
    controller: &'a PaginationController,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(controller: &'a PaginationController) -> Option<Self> {
        controller
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        controller.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        controller.publish_state();
        Some(Self { controller })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.controller.state.send_modify(|s| s.loading = false);
        self.controller.loading.store(false, Ordering::Release);
        self.controller.publish_state();
    }
}

impl PaginationController {
    pub fn new(
        source: Arc<dyn CatalogSourcePort>,
        store: SharedCatalogStore,
        events: Arc<dyn ExplorerEventsPort>,
    ) -> Self {
        let (state, _) = watch::channel(PaginationSnapshot::default());
        Self {
            source,
            store,
            events,
            loading: AtomicBool::new(false),
            state,
        }
    }

    pub fn snapshot(&self) -> PaginationSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PaginationSnapshot> {
        self.state.subscribe()
    }

    /// 加载第一页并替换整个目录，重置页码
    pub async fn load_initial(&self) -> LoadOutcome {
        let Some(_guard) = LoadingGuard::acquire(self) else {
            tracing::debug!("Initial load skipped, a load is already in flight");
            return LoadOutcome::Skipped;
        };

        tracing::info!(page = 1, "Loading catalog");
        match self.source.fetch_page(1).await {
            Ok(voices) => {
                let has_more = !voices.is_empty();
                let voices = admit(voices);
                let added = {
                    let mut store = self.store.write().await;
                    let size = store.replace_catalog(voices);
                    self.events.publish(store.visible_changed());
                    size
                };
                self.state.send_modify(|s| {
                    s.page = 1;
                    s.has_more = has_more;
                });
                tracing::info!(count = added, has_more, "Catalog loaded");
                if has_more {
                    LoadOutcome::Loaded { page: 1, added }
                } else {
                    LoadOutcome::Exhausted
                }
            }
            Err(e) => self.record_failure(1, e),
        }
    }

    /// 加载下一页并追加；正在加载或已无更多数据时不发出请求
    pub async fn load_more(&self) -> LoadOutcome {
        if !self.state.borrow().has_more {
            tracing::debug!("Load more skipped, catalog exhausted");
            return LoadOutcome::Skipped;
        }
        let Some(_guard) = LoadingGuard::acquire(self) else {
            tracing::debug!("Load more skipped, a load is already in flight");
            return LoadOutcome::Skipped;
        };

        let page = self.state.borrow().page + 1;
        tracing::info!(page, "Loading more voices");

        match self.source.fetch_page(page).await {
            Ok(voices) if voices.is_empty() => {
                self.state.send_modify(|s| s.has_more = false);
                tracing::info!(page, "Catalog exhausted");
                LoadOutcome::Exhausted
            }
            Ok(voices) => {
                let voices = admit(voices);
                let added = {
                    let mut store = self.store.write().await;
                    let added = store.append_page(voices);
                    self.events.publish(store.visible_changed());
                    added
                };
                self.state.send_modify(|s| {
                    s.page = page;
                    s.has_more = true;
                });
                tracing::info!(page, added, "Page appended");
                LoadOutcome::Loaded { page, added }
            }
            Err(e) => self.record_failure(page, e),
        }
    }

    /// 清除保存的错误
    pub fn clear_error(&self) {
        let had_error = self.state.send_if_modified(|s| s.error.take().is_some());
        if had_error {
            self.publish_state();
        }
    }

    fn record_failure(&self, page: u32, error: CatalogError) -> LoadOutcome {
        tracing::warn!(page, error = %error, "Catalog fetch failed");
        self.state.send_modify(|s| s.error = Some(error.clone()));
        LoadOutcome::Failed(error)
    }

    fn publish_state(&self) {
        let s = self.state.borrow().clone();
        self.events.publish(ExplorerEvent::PaginationChanged {
            page: s.page,
            has_more: s.has_more,
            loading: s.loading,
            error: s.error.map(|e| e.to_string()),
        });
    }
}

/// 在目录边界拒绝不合法的记录
fn admit(voices: Vec<Voice>) -> Vec<Voice> {
    voices
        .into_iter()
        .filter(|voice| match voice.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting invalid catalog record");
                false
            }
        })
        .collect()
}
