//! Preview Handlers - 试听控制与浏览器音频回报

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ports::AudioHandle;
use crate::application::ApplicationError;
use crate::domain::PreviewSession;
use crate::infrastructure::http::dto::{ApiResponse, Empty, ReportRequest, StopResponse, VoiceRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 开始（或切换 / 停止）试听
///
/// 加载与播放在后台进行，状态变化通过 `/ws/events` 推送
pub async fn start_preview(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoiceRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    if state.explorer.voice(&req.voice_id).await.is_none() {
        return Err(ApplicationError::UnknownVoice(req.voice_id).into());
    }

    let explorer = state.explorer.clone();
    tokio::spawn(async move {
        match explorer.preview(&req.voice_id).await {
            Ok(outcome) => {
                tracing::debug!(voice_id = %req.voice_id, outcome = ?outcome, "Preview settled")
            }
            Err(e) => tracing::warn!(voice_id = %req.voice_id, error = %e, "Preview failed"),
        }
    });

    Ok(Json(ApiResponse::ok()))
}

pub async fn stop_preview(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StopResponse>> {
    let stopped = state.explorer.stop_preview().await;
    Json(ApiResponse::success(StopResponse { stopped }))
}

pub async fn get_preview_state(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<PreviewSession>> {
    Json(ApiResponse::success(state.explorer.preview_session()))
}

/// 浏览器回报 loaded / ended / errored
pub async fn report_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.audio.report(AudioHandle::new(req.handle), req.report)?;
    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::events::{AudioInstruction, WsEvent};
    use crate::infrastructure::http::handlers::test_support::TestApp;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::broadcast;

    /// 等待下一条音频指令，跳过 Explorer 事件
    async fn next_instruction(rx: &mut broadcast::Receiver<WsEvent>) -> AudioInstruction {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("no audio instruction")
                .expect("channel closed");
            if let WsEvent::Audio(instruction) = event {
                return instruction;
            }
        }
    }

    async fn wait_for_state(app: &TestApp, expected: &str) -> serde_json::Value {
        for _ in 0..100 {
            let body = app.get("/api/preview/state").await;
            if body["data"]["playbackState"] == expected {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("preview never reached {}", expected);
    }

    #[tokio::test]
    async fn test_unknown_voice_is_not_found() {
        let app = TestApp::loaded().await;
        let body = app
            .post("/api/preview/start", json!({ "voiceId": "missing" }))
            .await;
        assert_eq!(body["errno"], 404);
    }

    #[tokio::test]
    async fn test_preview_relayed_to_browser() {
        let app = TestApp::loaded().await;
        let mut device = app.state.event_publisher.subscribe_global();

        let body = app
            .post("/api/preview/start", json!({ "voiceId": "voice-1" }))
            .await;
        assert_eq!(body["errno"], 0);

        let handle = match next_instruction(&mut device).await {
            AudioInstruction::AudioLoad { handle, uri } => {
                assert_eq!(uri, "/mock-samples/voice-1.mp3");
                handle
            }
            other => panic!("unexpected instruction {:?}", other),
        };
        let body = wait_for_state(&app, "loading").await;
        assert_eq!(body["data"]["activeVoiceId"], "voice-1");

        let body = app
            .post("/api/preview/report", json!({ "handle": handle, "kind": "loaded" }))
            .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(
            next_instruction(&mut device).await,
            AudioInstruction::AudioPlay { handle }
        );
        wait_for_state(&app, "playing").await;

        let body = app.post("/api/preview/stop", json!({})).await;
        assert_eq!(body["data"]["stopped"], true);
        let body = app.get("/api/preview/state").await;
        assert_eq!(body["data"]["playbackState"], "idle");
        assert_eq!(app.state.audio.live_handles(), 0);
    }

    #[tokio::test]
    async fn test_client_error_report_settles_idle() {
        let app = TestApp::loaded().await;
        let mut device = app.state.event_publisher.subscribe_global();

        app.post("/api/preview/start", json!({ "voiceId": "voice-2" }))
            .await;
        let AudioInstruction::AudioLoad { handle, .. } = next_instruction(&mut device).await else {
            panic!("expected load instruction");
        };

        app.post(
            "/api/preview/report",
            json!({ "handle": handle, "kind": "errored", "message": "decode failed" }),
        )
        .await;
        wait_for_state(&app, "idle").await;

        let body = app.get("/api/voices/list").await;
        assert_eq!(body["data"]["lastPreviewFailure"]["voiceId"], "voice-2");
    }

    #[tokio::test]
    async fn test_report_for_unknown_handle() {
        let app = TestApp::loaded().await;
        let body = app
            .post("/api/preview/report", json!({ "handle": 42, "kind": "ended" }))
            .await;
        assert_eq!(body["errno"], 404);
    }

    #[tokio::test]
    async fn test_stop_without_preview() {
        let app = TestApp::loaded().await;
        let body = app.post("/api/preview/stop", json!({})).await;
        assert_eq!(body["data"]["stopped"], false);
    }
}
