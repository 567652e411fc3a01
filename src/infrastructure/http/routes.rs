//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                      GET   健康检查
//! - /api/voices/list               GET   可见列表与状态快照
//! - /api/voices/filter_options     GET   筛选面板选项
//! - /api/voices/search             POST  搜索（防抖生效）
//! - /api/voices/filters            POST  部分更新筛选条件
//! - /api/voices/filters/clear      POST  清空筛选与搜索
//! - /api/voices/sort               POST  排序
//! - /api/voices/view_mode          POST  视图模式
//! - /api/voices/favorite           POST  切换收藏
//! - /api/voices/load_more          POST  加载下一页
//! - /api/voices/reload             POST  重新加载第一页
//! - /api/voices/clear_error        POST  清除加载错误
//! - /api/preview/start             POST  试听（异步，结果通过事件推送）
//! - /api/preview/stop              POST  停止试听
//! - /api/preview/state             GET   当前试听会话
//! - /api/preview/report            POST  浏览器回报音频生命周期
//! - /ws/events                     WS    全局事件流

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::global_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voices", voice_routes())
        .nest("/preview", preview_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voices))
        .route("/filter_options", get(handlers::get_filter_options))
        .route("/search", post(handlers::set_search))
        .route("/filters", post(handlers::update_filters))
        .route("/filters/clear", post(handlers::clear_filters))
        .route("/sort", post(handlers::set_sort))
        .route("/view_mode", post(handlers::set_view_mode))
        .route("/favorite", post(handlers::toggle_favorite))
        .route("/load_more", post(handlers::load_more))
        .route("/reload", post(handlers::reload))
        .route("/clear_error", post(handlers::clear_error))
}

/// Preview 路由
fn preview_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_preview))
        .route("/stop", post(handlers::stop_preview))
        .route("/state", get(handlers::get_preview_state))
        .route("/report", post(handlers::report_audio))
}
