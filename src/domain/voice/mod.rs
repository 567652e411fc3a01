//! Voice Context - 音色目录上下文
//!
//! 职责:
//! - 音色目录记录（不可变）
//! - 性别 / 年龄段 / 分类等值对象
//! - 展示名称处理

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Voice;
pub use errors::VoiceError;
pub use value_objects::{
    strip_locale_suffix, AgeGroup, Gender, VoiceCategory, VoiceId, MAX_RATING, MIN_RATING,
};
