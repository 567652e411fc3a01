//! Voice Handlers - 目录浏览、查询输入、收藏、分页

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ApplicationError;
use crate::domain::query::{FilterOptions, FilterPatch};
use crate::domain::voice::{MAX_RATING, MIN_RATING};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, FavoriteResponse, LoadOutcomeDto, SearchRequest, SnapshotResponse,
    SortRequest, ViewModeRequest, VoiceRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// 读取
// ============================================================================

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SnapshotResponse>> {
    let snapshot = state.explorer.snapshot().await;
    Json(ApiResponse::success(snapshot.into()))
}

pub async fn get_filter_options(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<FilterOptions>> {
    Json(ApiResponse::success(state.explorer.filter_options().await))
}

// ============================================================================
// 查询输入
// ============================================================================

/// 搜索经防抖后生效，结果通过事件通知
pub async fn set_search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Json<ApiResponse<Empty>> {
    state.explorer.set_search_text(req.text).await;
    Json(ApiResponse::ok())
}

pub async fn update_filters(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<FilterPatch>,
) -> Result<Json<ApiResponse<SnapshotResponse>>, ApiError> {
    if let Some(Some(rating)) = patch.min_rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ApplicationError::validation(format!(
                "minRating must be within [0, 5], got {}",
                rating
            ))
            .into());
        }
    }

    state.explorer.update_filters(patch).await;
    let snapshot = state.explorer.snapshot().await;
    Ok(Json(ApiResponse::success(snapshot.into())))
}

pub async fn clear_filters(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SnapshotResponse>> {
    state.explorer.clear_filters().await;
    let snapshot = state.explorer.snapshot().await;
    Json(ApiResponse::success(snapshot.into()))
}

pub async fn set_sort(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SortRequest>,
) -> Json<ApiResponse<SnapshotResponse>> {
    state.explorer.set_sort(req.field, req.direction).await;
    let snapshot = state.explorer.snapshot().await;
    Json(ApiResponse::success(snapshot.into()))
}

pub async fn set_view_mode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewModeRequest>,
) -> Json<ApiResponse<Empty>> {
    state.explorer.set_view_mode(req.view_mode).await;
    Json(ApiResponse::ok())
}

// ============================================================================
// 收藏
// ============================================================================

pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoiceRequest>,
) -> Json<ApiResponse<FavoriteResponse>> {
    let is_favorite = state.explorer.toggle_favorite(&req.voice_id).await;
    Json(ApiResponse::success(FavoriteResponse {
        voice_id: req.voice_id,
        is_favorite,
    }))
}

// ============================================================================
// 分页
// ============================================================================

pub async fn load_more(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LoadOutcomeDto>> {
    let outcome = state.explorer.load_more().await;
    Json(ApiResponse::success(outcome.into()))
}

/// 刷新：重新拉取第一页并替换目录
pub async fn reload(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LoadOutcomeDto>> {
    let outcome = state.explorer.load_initial().await;
    Json(ApiResponse::success(outcome.into()))
}

pub async fn clear_error(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Empty>> {
    state.explorer.clear_error();
    Json(ApiResponse::ok())
}
