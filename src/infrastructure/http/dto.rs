//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{ExplorerSnapshot, LoadOutcome, PaginationSnapshot};
use crate::domain::query::{QueryInput, SortDirection, SortField, ViewMode, VisibleVoice};
use crate::domain::voice::{Voice, VoiceId};
use crate::domain::{PreviewFailure, PreviewSession};
use crate::infrastructure::adapters::ClientAudioReport;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

/// 可见列表中的一条音色
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    #[serde(flatten)]
    pub voice: Voice,
    pub short_name: String,
    pub is_favorite: bool,
}

impl From<&VisibleVoice> for VoiceDto {
    fn from(visible: &VisibleVoice) -> Self {
        Self {
            short_name: visible.voice.short_name().to_string(),
            voice: (*visible.voice).clone(),
            is_favorite: visible.is_favorite,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<PaginationSnapshot> for PaginationDto {
    fn from(snapshot: PaginationSnapshot) -> Self {
        Self {
            page: snapshot.page,
            has_more: snapshot.has_more,
            loading: snapshot.loading,
            error: snapshot.error.map(|e| e.to_string()),
        }
    }
}

/// `GET /api/voices/list` 响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub voices: Vec<VoiceDto>,
    pub total: usize,
    pub catalog_size: usize,
    pub query: QueryInput,
    pub pending_search: Option<String>,
    pub view_mode: ViewMode,
    pub pagination: PaginationDto,
    pub preview: PreviewSession,
    pub last_preview_failure: Option<PreviewFailure>,
    pub favorites_count: usize,
}

impl From<ExplorerSnapshot> for SnapshotResponse {
    fn from(snapshot: ExplorerSnapshot) -> Self {
        let view_mode = snapshot.view_mode();
        Self {
            voices: snapshot.visible.iter().map(VoiceDto::from).collect(),
            total: snapshot.visible.len(),
            catalog_size: snapshot.catalog_size,
            query: snapshot.input,
            pending_search: snapshot.pending_search,
            view_mode,
            pagination: snapshot.pagination.into(),
            preview: snapshot.preview,
            last_preview_failure: snapshot.last_preview_failure,
            favorites_count: snapshot.favorites_count,
        }
    }
}

/// 分页加载结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOutcomeDto {
    /// loaded / exhausted / failed / skipped
    pub outcome: &'static str,
    pub page: Option<u32>,
    pub added: Option<usize>,
    pub error: Option<String>,
    pub retryable: bool,
}

impl From<LoadOutcome> for LoadOutcomeDto {
    fn from(outcome: LoadOutcome) -> Self {
        let base = Self {
            outcome: "skipped",
            page: None,
            added: None,
            error: None,
            retryable: false,
        };
        match outcome {
            LoadOutcome::Loaded { page, added } => Self {
                outcome: "loaded",
                page: Some(page),
                added: Some(added),
                ..base
            },
            LoadOutcome::Exhausted => Self {
                outcome: "exhausted",
                ..base
            },
            LoadOutcome::Failed(e) => Self {
                outcome: "failed",
                error: Some(e.to_string()),
                retryable: true,
                ..base
            },
            LoadOutcome::Skipped => base,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModeRequest {
    pub view_mode: ViewMode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    pub voice_id: VoiceId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub voice_id: VoiceId,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub stopped: bool,
}

/// 浏览器回报音频生命周期
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub handle: u64,
    #[serde(flatten)]
    pub report: ClientAudioReport,
}
