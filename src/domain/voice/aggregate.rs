//! Voice Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    strip_locale_suffix, AgeGroup, Gender, VoiceCategory, VoiceError, VoiceId, MAX_RATING,
    MIN_RATING,
};

/// Voice 目录记录
///
/// 不变量:
/// - 由目录拉取创建，之后不可原地修改（刷新时整体替换）
/// - id 非空，rating 位于 [0, 5]
/// - 是否收藏不存储在记录上，由查询引擎派生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    id: VoiceId,
    #[serde(alias = "name")]
    display_name: String,
    gender: Gender,
    language_code: String,
    #[serde(alias = "language")]
    language_name: String,
    age_group: AgeGroup,
    #[serde(default)]
    style: String,
    category: VoiceCategory,
    #[serde(default)]
    provider: String,
    #[serde(default)]
    is_premium: bool,
    #[serde(default, alias = "sampleUrl", skip_serializing_if = "Option::is_none")]
    sample_uri: Option<String>,
    #[serde(default)]
    tags: BTreeSet<String>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    usage_count: u64,
    #[serde(default)]
    is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Voice {
    /// 创建音色记录，其余字段取默认值
    pub fn new(id: impl Into<VoiceId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            gender: Gender::Other,
            language_code: String::new(),
            language_name: String::new(),
            age_group: AgeGroup::Adult,
            style: String::new(),
            category: VoiceCategory::Natural,
            provider: String::new(),
            is_premium: false,
            sample_uri: None,
            tags: BTreeSet::new(),
            rating: 0.0,
            usage_count: 0,
            is_new: false,
            description: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.language_code = code.into();
        self.language_name = name.into();
        self
    }

    pub fn with_age_group(mut self, age_group: AgeGroup) -> Self {
        self.age_group = age_group;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_category(mut self, category: VoiceCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    pub fn with_sample_uri(mut self, uri: impl Into<String>) -> Self {
        self.sample_uri = Some(uri.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = usage_count;
        self
    }

    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 校验目录记录
    pub fn validate(&self) -> Result<(), VoiceError> {
        if self.id.is_empty() {
            return Err(VoiceError::EmptyId);
        }
        if self.display_name.is_empty() {
            return Err(VoiceError::EmptyName(self.id.clone()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(VoiceError::InvalidRating {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }

    /// 展示用名称（去掉 locale 后缀）
    pub fn short_name(&self) -> &str {
        strip_locale_suffix(&self.display_name)
    }

    /// 是否可以试听
    pub fn has_sample(&self) -> bool {
        self.sample_uri.is_some()
    }

    // Getters
    pub fn id(&self) -> &VoiceId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn category(&self) -> VoiceCategory {
        self.category
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    pub fn sample_uri(&self) -> Option<&str> {
        self.sample_uri.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_creation() {
        let voice = Voice::new("voice-0", "Emma_en-US")
            .with_language("en-US", "English (US)")
            .with_rating(4.2)
            .with_sample_uri("/samples/voice-0.mp3");

        assert_eq!(voice.id().as_str(), "voice-0");
        assert_eq!(voice.short_name(), "Emma");
        assert_eq!(voice.display_name(), "Emma_en-US");
        assert!(voice.has_sample());
        assert!(voice.validate().is_ok());
    }

    #[test]
    fn test_rating_validation() {
        let voice = Voice::new("v", "Too Good").with_rating(5.5);
        assert!(matches!(
            voice.validate(),
            Err(VoiceError::InvalidRating { .. })
        ));

        let voice = Voice::new("", "Nameless");
        assert!(matches!(voice.validate(), Err(VoiceError::EmptyId)));
    }

    #[test]
    fn test_deserialize_legacy_payload() {
        let json = r#"{
            "id": "voice-3",
            "name": "Isabella_fr-FR",
            "gender": "F",
            "language": "French",
            "languageCode": "fr-FR",
            "ageGroup": "adult",
            "style": "Warm",
            "category": "character",
            "provider": "Google",
            "isPremium": true,
            "sampleUrl": "/mock-samples/voice-3.mp3",
            "tags": ["French", "Warm", "character", "Warm"],
            "rating": 4.1,
            "usageCount": 1200,
            "isNew": true
        }"#;

        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.gender(), Gender::Female);
        assert_eq!(voice.language_name(), "French");
        assert_eq!(voice.sample_uri(), Some("/mock-samples/voice-3.mp3"));
        assert_eq!(voice.tags().len(), 3);
        assert!(voice.is_new());
    }
}
