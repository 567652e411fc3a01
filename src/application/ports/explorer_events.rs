//! Explorer Events Port - 状态变更通知
//!
//! 应用层在每次状态变化后同步发布事件，基础设施层负责转发（WebSocket 等）

use serde::Serialize;

use crate::domain::query::ViewMode;
use crate::domain::voice::VoiceId;
use crate::domain::PreviewSession;

/// Explorer 状态变更事件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ExplorerEvent {
    /// 可见列表重新计算
    VisibleChanged { total: usize, catalog_size: usize },

    /// 分页状态变化
    PaginationChanged {
        page: u32,
        has_more: bool,
        loading: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// 试听会话变化
    PreviewChanged(PreviewSession),

    /// 收藏切换
    FavoriteToggled {
        voice_id: VoiceId,
        is_favorite: bool,
        total: usize,
    },

    /// 视图模式变化
    ViewModeChanged { view_mode: ViewMode },
}

/// Explorer Events Port
///
/// 发布不得阻塞；没有订阅者时事件直接丢弃
pub trait ExplorerEventsPort: Send + Sync {
    fn publish(&self, event: ExplorerEvent);
}
