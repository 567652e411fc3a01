//! HTTP Catalog Source - 从目录服务分页拉取音色
//!
//! 外部目录 API:
//! GET {base_url}/api/voices?page=N
//! Response: `[Voice, ...]` 或 `{"voices": [Voice, ...]}`，空列表表示没有更多数据

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{CatalogError, CatalogSourcePort};
use crate::domain::voice::Voice;

/// HTTP 目录源配置
#[derive(Debug, Clone)]
pub struct HttpCatalogSourceConfig {
    /// 目录服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpCatalogSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpCatalogSourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 响应体的两种形态
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    List(Vec<Voice>),
    Wrapped { voices: Vec<Voice> },
}

impl CatalogPayload {
    fn into_voices(self) -> Vec<Voice> {
        match self {
            Self::List(voices) | Self::Wrapped { voices } => voices,
        }
    }
}

/// HTTP 目录源
pub struct HttpCatalogSource {
    client: Client,
    config: HttpCatalogSourceConfig,
}

impl HttpCatalogSource {
    pub fn new(config: HttpCatalogSourceConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn voices_url(&self) -> String {
        format!("{}/api/voices", self.config.base_url.trim_end_matches('/'))
    }
}

fn parse_payload(bytes: &[u8]) -> Result<Vec<Voice>, CatalogError> {
    serde_json::from_slice::<CatalogPayload>(bytes)
        .map(CatalogPayload::into_voices)
        .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl CatalogSourcePort for HttpCatalogSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Voice>, CatalogError> {
        tracing::debug!(url = %self.voices_url(), page, "Fetching catalog page");

        let response = self
            .client
            .get(self.voices_url())
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout
                } else if e.is_connect() {
                    CatalogError::NetworkError(format!("Cannot connect to catalog service: {}", e))
                } else {
                    CatalogError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::InvalidResponse(format!("Failed to read body: {}", e)))?;
        let voices = parse_payload(&body)?;

        tracing::info!(page, count = voices.len(), "Catalog page fetched");
        Ok(voices)
    }
}
