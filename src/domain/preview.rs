//! 试听会话值对象

use serde::Serialize;

use super::voice::VoiceId;

/// 试听播放状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Error,
}

impl PlaybackState {
    /// 是否持有音频资源
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Loading | Self::Playing)
    }
}

/// 试听失败信息（按音色展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFailure {
    pub voice_id: VoiceId,
    pub message: String,
}

/// 试听会话快照
///
/// 不变量: `active_voice_id` 仅在 Loading / Playing 时非空；
/// `failure` 仅在 Error 时非空。只能通过构造函数创建以保证不变量。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSession {
    active_voice_id: Option<VoiceId>,
    playback_state: PlaybackState,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<PreviewFailure>,
}

impl PreviewSession {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn loading(voice_id: VoiceId) -> Self {
        Self {
            active_voice_id: Some(voice_id),
            playback_state: PlaybackState::Loading,
            failure: None,
        }
    }

    pub fn playing(voice_id: VoiceId) -> Self {
        Self {
            active_voice_id: Some(voice_id),
            playback_state: PlaybackState::Playing,
            failure: None,
        }
    }

    pub fn failed(voice_id: VoiceId, message: impl Into<String>) -> Self {
        Self {
            active_voice_id: None,
            playback_state: PlaybackState::Error,
            failure: Some(PreviewFailure {
                voice_id,
                message: message.into(),
            }),
        }
    }

    pub fn active_voice_id(&self) -> Option<&VoiceId> {
        self.active_voice_id.as_ref()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    pub fn failure(&self) -> Option<&PreviewFailure> {
        self.failure.as_ref()
    }

    /// 指定音色是否正在加载或播放
    pub fn is_active_for(&self, voice_id: &VoiceId) -> bool {
        self.playback_state.is_active() && self.active_voice_id.as_ref() == Some(voice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_hold_invariant() {
        let id = VoiceId::new("v");

        let idle = PreviewSession::idle();
        assert!(idle.active_voice_id().is_none());
        assert_eq!(idle.playback_state(), PlaybackState::Idle);

        let loading = PreviewSession::loading(id.clone());
        assert!(loading.is_active_for(&id));

        let playing = PreviewSession::playing(id.clone());
        assert!(playing.is_active_for(&id));
        assert!(!playing.is_active_for(&VoiceId::new("other")));

        let failed = PreviewSession::failed(id.clone(), "404");
        assert!(failed.active_voice_id().is_none());
        assert_eq!(failed.failure().map(|f| &f.voice_id), Some(&id));
        assert!(!failed.is_active_for(&id));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(PreviewSession::playing(VoiceId::new("v1"))).unwrap();
        assert_eq!(json["activeVoiceId"], "v1");
        assert_eq!(json["playbackState"], "playing");
        assert!(json.get("failure").is_none());
    }
}
