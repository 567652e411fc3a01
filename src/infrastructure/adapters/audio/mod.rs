//! Audio Adapter - 试听音频提供者

mod relay_audio_provider;

pub use relay_audio_provider::{ClientAudioReport, RelayAudioProvider};
