//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识（目录分配的不透明字符串）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for VoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for VoiceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 性别
///
/// 兼容旧前端的 `M` / `F` / `Other` 写法
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "M")]
    Male,
    #[serde(alias = "F")]
    Female,
    #[serde(alias = "Other")]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// 年龄段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Teen => "teen",
            Self::Adult => "adult",
            Self::Senior => "senior",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
            Self::Senior => "Senior",
        }
    }
}

/// 音色分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceCategory {
    Natural,
    Professional,
    Emotional,
    Character,
    Celebrity,
}

impl VoiceCategory {
    pub const ALL: [VoiceCategory; 5] = [
        Self::Natural,
        Self::Professional,
        Self::Emotional,
        Self::Character,
        Self::Celebrity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Professional => "professional",
            Self::Emotional => "emotional",
            Self::Character => "character",
            Self::Celebrity => "celebrity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Natural => "Natural",
            Self::Professional => "Professional",
            Self::Emotional => "Emotional",
            Self::Character => "Character",
            Self::Celebrity => "Celebrity",
        }
    }
}

/// 评分取值范围
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// 去掉目录名称中的 locale 后缀，仅用于展示
///
/// 目录名称形如 `Emma_en-US`，展示为 `Emma`；匹配搜索时必须使用原始名称。
pub fn strip_locale_suffix(name: &str) -> &str {
    match name.find('_') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_locale_suffix() {
        assert_eq!(strip_locale_suffix("Emma_en-US"), "Emma");
        assert_eq!(strip_locale_suffix("Liam"), "Liam");
        assert_eq!(strip_locale_suffix("a_b_c"), "a");
        assert_eq!(strip_locale_suffix("_x"), "");
    }

    #[test]
    fn test_gender_accepts_legacy_codes() {
        let g: Gender = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(g, Gender::Male);
        let g: Gender = serde_json::from_str("\"female\"").unwrap();
        assert_eq!(g, Gender::Female);
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_voice_id_is_transparent() {
        let id = VoiceId::new("voice-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"voice-1\"");
        assert_eq!(id.to_string(), "voice-1");
    }
}
