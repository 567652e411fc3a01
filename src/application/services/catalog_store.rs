//! Voice Catalog Store - 目录与查询输入的唯一持有者
//!
//! 所有修改都通过具名操作完成，每次修改后同步重新计算可见列表

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::ExplorerEvent;
use crate::domain::query::{
    compute_visible, FilterPatch, QueryInput, SortSpec, ViewMode, VisibleVoice,
};
use crate::domain::voice::{Voice, VoiceId};
use crate::domain::FavoritesSet;

/// 跨任务共享的 Store
pub type SharedCatalogStore = Arc<RwLock<VoiceCatalogStore>>;

/// 目录 Store
#[derive(Debug, Default)]
pub struct VoiceCatalogStore {
    catalog: Vec<Arc<Voice>>,
    ids: HashSet<VoiceId>,
    input: QueryInput,
    pending_search: Option<String>,
    favorites: FavoritesSet,
    visible: Vec<VisibleVoice>,
}

impl VoiceCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedCatalogStore {
        Arc::new(RwLock::new(self))
    }

    // ========================================================================
    // 读取
    // ========================================================================

    pub fn catalog(&self) -> &[Arc<Voice>] {
        &self.catalog
    }

    pub fn visible(&self) -> &[VisibleVoice] {
        &self.visible
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    /// 已输入但尚未生效的搜索文本
    pub fn pending_search(&self) -> Option<&str> {
        self.pending_search.as_deref()
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn find(&self, id: &VoiceId) -> Option<Arc<Voice>> {
        if !self.ids.contains(id) {
            return None;
        }
        self.catalog.iter().find(|v| v.id() == id).cloned()
    }

    // ========================================================================
    // 目录修改
    // ========================================================================

    /// 用新的记录替换整个目录（刷新）
    pub fn replace_catalog(&mut self, voices: Vec<Voice>) -> usize {
        self.catalog.clear();
        self.ids.clear();
        self.push_unique(voices);
        self.recompute();
        self.catalog.len()
    }

    /// 追加一页记录，已存在的 id 跳过；返回实际追加数量
    pub fn append_page(&mut self, voices: Vec<Voice>) -> usize {
        let added = self.push_unique(voices);
        if added > 0 {
            self.recompute();
        }
        added
    }

    fn push_unique(&mut self, voices: Vec<Voice>) -> usize {
        let before = self.catalog.len();
        for voice in voices {
            if self.ids.insert(voice.id().clone()) {
                self.catalog.push(Arc::new(voice));
            } else {
                tracing::debug!(voice_id = %voice.id(), "Skipping duplicate catalog record");
            }
        }
        self.catalog.len() - before
    }

    // ========================================================================
    // 查询输入修改
    // ========================================================================

    /// 立即生效的搜索文本，同时清除待生效的输入
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.pending_search = None;
        self.input.search_text = text.into();
        self.recompute();
    }

    /// 记录待生效的搜索文本（防抖期间）
    pub fn stage_search(&mut self, text: impl Into<String>) {
        self.pending_search = Some(text.into());
    }

    /// 防抖到期：仅当待生效文本仍是 `text` 时才应用
    pub fn commit_search(&mut self, text: &str) -> bool {
        if self.pending_search.as_deref() != Some(text) {
            return false;
        }
        self.set_search_text(text);
        true
    }

    pub fn update_filters(&mut self, patch: FilterPatch) {
        self.input.filters.apply(patch);
        self.recompute();
    }

    /// 清空全部筛选条件与搜索文本
    pub fn clear_filters(&mut self) {
        self.input.filters = Default::default();
        self.input.search_text.clear();
        self.pending_search = None;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.input.sort = sort;
        self.recompute();
    }

    /// 仅影响展示，不触发重新计算
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.input.view_mode = view_mode;
    }

    /// 同步收藏快照并刷新收藏标记
    pub fn observe_favorites(&mut self, favorites: FavoritesSet) {
        self.favorites = favorites;
        self.recompute();
    }

    /// 可见列表变化事件
    pub fn visible_changed(&self) -> ExplorerEvent {
        ExplorerEvent::VisibleChanged {
            total: self.visible.len(),
            catalog_size: self.catalog.len(),
        }
    }

    fn recompute(&mut self) {
        self.visible = compute_visible(&self.catalog, &self.favorites, &self.input);
    }
}
