//! Handler 测试工具：以内存依赖组装完整路由

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::application::{ExplorerPorts, ExplorerSettings, VoiceExplorer};
use crate::infrastructure::adapters::{
    FakeCatalogSource, FakeCatalogSourceConfig, RelayAudioProvider,
};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::http::routes::create_routes;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::memory::InMemoryKeyValueStore;

pub struct TestApp {
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    /// 假目录（3 页），已加载第一页
    pub async fn loaded() -> Self {
        let publisher = EventPublisher::new().arc();
        let audio = RelayAudioProvider::new(publisher.clone()).arc();
        let explorer = VoiceExplorer::start(
            ExplorerSettings::default(),
            ExplorerPorts {
                catalog: Arc::new(FakeCatalogSource::new(FakeCatalogSourceConfig::default())),
                store: InMemoryKeyValueStore::new().arc(),
                audio: audio.clone(),
                events: publisher.clone(),
            },
        )
        .await;
        explorer.load_initial().await;

        let state = Arc::new(AppState::new(Arc::new(explorer), audio, publisher));
        let router = create_routes().with_state(state.clone());
        Self { state, router }
    }

    pub async fn get(&self, uri: &str) -> serde_json::Value {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> serde_json::Value {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
