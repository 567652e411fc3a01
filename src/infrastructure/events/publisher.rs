//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现：Explorer 状态变更 + 发给浏览器的音频指令

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::{ExplorerEvent, ExplorerEventsPort};

/// 发给浏览器音频设备的指令
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum AudioInstruction {
    /// 创建音频元素并开始加载
    AudioLoad { handle: u64, uri: String },
    AudioPlay { handle: u64 },
    AudioPause { handle: u64 },
    /// 销毁音频元素
    AudioRelease { handle: u64 },
}

/// WebSocket 事件类型
///
/// 两类事件共用 `{"event": ..., "data": ...}` 外形
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WsEvent {
    Explorer(ExplorerEvent),
    Audio(AudioInstruction),
}

/// 事件发布器
pub struct EventPublisher {
    /// 所有 WebSocket 连接共享的广播通道
    global_channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (global_tx, _) = broadcast::channel(capacity);
        Self {
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全局事件
    pub fn subscribe_global(&self) -> broadcast::Receiver<WsEvent> {
        self.global_channel.subscribe()
    }

    /// 当前连接数
    pub fn subscriber_count(&self) -> usize {
        self.global_channel.receiver_count()
    }

    /// 广播事件，返回收到事件的连接数
    pub fn broadcast(&self, event: WsEvent) -> usize {
        match self.global_channel.send(event) {
            Ok(receivers) => receivers,
            Err(e) => {
                tracing::debug!(event = ?e.0, "Failed to publish event (no receivers)");
                0
            }
        }
    }

    /// 发布音频指令
    pub fn publish_audio(&self, instruction: AudioInstruction) -> usize {
        self.broadcast(WsEvent::Audio(instruction))
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerEventsPort for EventPublisher {
    fn publish(&self, event: ExplorerEvent) {
        self.broadcast(WsEvent::Explorer(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::ViewMode;
    use crate::domain::voice::VoiceId;
    use crate::domain::PreviewSession;

    #[test]
    fn test_wire_shape() {
        let event = WsEvent::Explorer(ExplorerEvent::ViewModeChanged {
            view_mode: ViewMode::List,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "ViewModeChanged");
        assert_eq!(json["data"]["view_mode"], "list");

        let event = WsEvent::Explorer(ExplorerEvent::PreviewChanged(PreviewSession::loading(
            VoiceId::new("v1"),
        )));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "PreviewChanged");
        assert_eq!(json["data"]["playbackState"], "loading");

        let event = WsEvent::Audio(AudioInstruction::AudioLoad {
            handle: 7,
            uri: "/a.mp3".to_string(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "AudioLoad");
        assert_eq!(json["data"]["handle"], 7);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let publisher = EventPublisher::new();
        assert_eq!(publisher.publish_audio(AudioInstruction::AudioPlay { handle: 1 }), 0);

        let mut rx = publisher.subscribe_global();
        assert_eq!(publisher.subscriber_count(), 1);

        ExplorerEventsPort::publish(
            &publisher,
            ExplorerEvent::VisibleChanged {
                total: 2,
                catalog_size: 5,
            },
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            WsEvent::Explorer(ExplorerEvent::VisibleChanged {
                total: 2,
                catalog_size: 5
            })
        );
    }
}
