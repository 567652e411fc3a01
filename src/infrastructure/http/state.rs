//! Application State
//!
//! HTTP 层共享的应用状态

use std::sync::Arc;

use crate::application::VoiceExplorer;
use crate::infrastructure::adapters::RelayAudioProvider;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    pub explorer: Arc<VoiceExplorer>,
    /// 浏览器回报音频事件的入口
    pub audio: Arc<RelayAudioProvider>,
    pub event_publisher: Arc<EventPublisher>,
}

impl AppState {
    pub fn new(
        explorer: Arc<VoiceExplorer>,
        audio: Arc<RelayAudioProvider>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            explorer,
            audio,
            event_publisher,
        }
    }
}
