//! Fake Catalog Source - 用于开发与演示的目录源
//!
//! 确定性生成音色：第 1 页 24 条，之后每页 12 条，超过 `pages` 页返回空列表

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{CatalogError, CatalogSourcePort};
use crate::domain::voice::{AgeGroup, Gender, Voice, VoiceCategory};

const FIRST_PAGE_SIZE: usize = 24;
const PAGE_SIZE: usize = 12;

const LANGUAGES: [(&str, &str); 10] = [
    ("en-US", "English (US)"),
    ("en-GB", "English (UK)"),
    ("es-ES", "Spanish (Spain)"),
    ("fr-FR", "French"),
    ("de-DE", "German"),
    ("it-IT", "Italian"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("zh-CN", "Chinese (Mandarin)"),
];

const NAMES: [&str; 19] = [
    "Emma", "Olivia", "Sophia", "Isabella", "Mia", "Charlotte", "Amelia", "Harper", "Evelyn",
    "Liam", "Noah", "William", "James", "Oliver", "Benjamin", "Elijah", "Lucas", "Mason", "Logan",
];

const STYLES: [&str; 8] = [
    "Natural",
    "Professional",
    "Warm",
    "Energetic",
    "Calm",
    "Authoritative",
    "Friendly",
    "Dramatic",
];

const PROVIDERS: [&str; 6] = [
    "OpenAI",
    "ElevenLabs",
    "Google",
    "Amazon",
    "Microsoft",
    "Synthesia",
];

const AGE_GROUPS: [AgeGroup; 3] = [AgeGroup::Adult, AgeGroup::Teen, AgeGroup::Senior];

/// Fake 目录源配置
#[derive(Debug, Clone)]
pub struct FakeCatalogSourceConfig {
    /// 有数据的页数
    pub pages: u32,
    /// 模拟网络延迟
    pub latency: Duration,
}

impl Default for FakeCatalogSourceConfig {
    fn default() -> Self {
        Self {
            pages: 3,
            latency: Duration::ZERO,
        }
    }
}

/// Fake 目录源
pub struct FakeCatalogSource {
    config: FakeCatalogSourceConfig,
}

impl FakeCatalogSource {
    pub fn new(config: FakeCatalogSourceConfig) -> Self {
        tracing::info!(pages = config.pages, "FakeCatalogSource initialized");
        Self { config }
    }

    /// 生成指定页的记录
    pub fn page(&self, page: u32) -> Vec<Voice> {
        if page == 0 || page > self.config.pages {
            return Vec::new();
        }

        let (start, len) = if page == 1 {
            (0, FIRST_PAGE_SIZE)
        } else {
            (FIRST_PAGE_SIZE + (page as usize - 2) * PAGE_SIZE, PAGE_SIZE)
        };

        (start..start + len).map(generate_voice).collect()
    }
}

/// 基于序号的确定性伪随机数，取值 [0, 100)
fn jitter(index: usize, salt: usize) -> usize {
    (index.wrapping_mul(2654435761).wrapping_add(salt.wrapping_mul(40503)) >> 7) % 100
}

fn generate_voice(index: usize) -> Voice {
    let (code, language) = LANGUAGES[index % LANGUAGES.len()];
    let name = NAMES[index % NAMES.len()];
    let style = STYLES[index % STYLES.len()];
    let category = VoiceCategory::ALL[index % VoiceCategory::ALL.len()];
    let gender = if jitter(index, 1) >= 50 {
        Gender::Female
    } else {
        Gender::Male
    };

    Voice::new(format!("voice-{}", index), format!("{}_{}", name, code))
        .with_gender(gender)
        .with_language(code, language)
        .with_age_group(AGE_GROUPS[jitter(index, 2) % AGE_GROUPS.len()])
        .with_style(style)
        .with_category(category)
        .with_provider(PROVIDERS[index % PROVIDERS.len()])
        .with_premium(jitter(index, 3) >= 60)
        .with_sample_uri(format!("/mock-samples/voice-{}.mp3", index))
        .with_description(format!(
            "A {} {} voice perfect for professional use.",
            style.to_lowercase(),
            language
        ))
        .with_tags([language, style, category.as_str()])
        .with_rating(3.5 + jitter(index, 4) as f64 * 0.015)
        .with_usage_count((jitter(index, 5) * 97) as u64)
        .with_new(jitter(index, 6) >= 80)
}

#[async_trait]
impl CatalogSourcePort for FakeCatalogSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<Voice>, CatalogError> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let voices = self.page(page);
        tracing::debug!(page, count = voices.len(), "FakeCatalogSource: returning generated page");
        Ok(voices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_page_sizes_and_end() {
        let source = FakeCatalogSource::new(FakeCatalogSourceConfig {
            pages: 3,
            ..Default::default()
        });

        assert_eq!(source.fetch_page(1).await.unwrap().len(), 24);
        assert_eq!(source.fetch_page(2).await.unwrap().len(), 12);
        assert_eq!(source.fetch_page(3).await.unwrap().len(), 12);
        assert!(source.fetch_page(4).await.unwrap().is_empty());
    }

    #[test]
    fn test_pages_do_not_overlap_and_are_valid() {
        let source = FakeCatalogSource::new(FakeCatalogSourceConfig::default());
        let all: Vec<Voice> = (1..=3).flat_map(|p| source.page(p)).collect();

        let ids: HashSet<&str> = all.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids.len(), all.len());
        assert!(all.iter().all(|v| v.validate().is_ok()));
        assert!(all.iter().all(|v| v.has_sample()));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let source = FakeCatalogSource::new(FakeCatalogSourceConfig::default());
        assert_eq!(source.page(2), source.page(2));

        let first = &source.page(1)[0];
        assert_eq!(first.display_name(), "Emma_en-US");
        assert_eq!(first.short_name(), "Emma");
        assert_eq!(first.provider(), "OpenAI");
    }
}
