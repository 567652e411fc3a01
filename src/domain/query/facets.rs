//! Filter Facets - 筛选面板选项
//!
//! 基于未筛选的完整目录，按首次出现顺序统计每个维度的取值与数量

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::domain::voice::{AgeGroup, Gender, Voice, VoiceCategory};

/// 语言选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
    pub count: usize,
}

/// 通用选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption<T> {
    pub value: T,
    pub label: String,
    pub count: usize,
}

/// 全部筛选维度的选项
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub languages: Vec<LanguageOption>,
    pub genders: Vec<FacetOption<Gender>>,
    pub age_groups: Vec<FacetOption<AgeGroup>>,
    pub categories: Vec<FacetOption<VoiceCategory>>,
    pub providers: Vec<FacetOption<String>>,
}

/// 统计筛选选项
pub fn filter_options(catalog: &[Arc<Voice>]) -> FilterOptions {
    let languages = tally(catalog, |v| v.language_code().to_string())
        .into_iter()
        .map(|(code, first, count)| LanguageOption {
            name: if first.language_name().is_empty() {
                code.clone()
            } else {
                first.language_name().to_string()
            },
            code,
            count,
        })
        .collect();

    FilterOptions {
        languages,
        genders: labelled(tally(catalog, Voice::gender), |g| g.label().to_string()),
        age_groups: labelled(tally(catalog, Voice::age_group), |a| a.label().to_string()),
        categories: labelled(tally(catalog, Voice::category), |c| c.label().to_string()),
        providers: labelled(tally(catalog, |v| v.provider().to_string()), |p| p.clone()),
    }
}

/// 按首次出现顺序计数，同时记录每个取值第一次出现的记录
fn tally<'a, K, F>(catalog: &'a [Arc<Voice>], key: F) -> Vec<(K, &'a Voice, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Voice) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, &'a Voice, usize)> = Vec::new();

    for voice in catalog {
        let k = key(voice);
        match index.get(&k) {
            Some(&i) => counts[i].2 += 1,
            None => {
                index.insert(k.clone(), counts.len());
                counts.push((k, voice.as_ref(), 1));
            }
        }
    }

    counts
}

fn labelled<K, L>(counts: Vec<(K, &Voice, usize)>, label: L) -> Vec<FacetOption<K>>
where
    L: Fn(&K) -> String,
{
    counts
        .into_iter()
        .map(|(value, _, count)| FacetOption {
            label: label(&value),
            value,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_options_counts_in_first_seen_order() {
        let catalog: Vec<Arc<Voice>> = vec![
            Voice::new("1", "Emma_en-US")
                .with_language("en-US", "English (US)")
                .with_gender(Gender::Female)
                .with_provider("OpenAI"),
            Voice::new("2", "Liam_de-DE")
                .with_language("de-DE", "German")
                .with_gender(Gender::Male)
                .with_provider("Google"),
            Voice::new("3", "Mia_en-US")
                .with_language("en-US", "English (US)")
                .with_gender(Gender::Female)
                .with_provider("OpenAI")
                .with_category(VoiceCategory::Celebrity),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();

        let options = filter_options(&catalog);

        assert_eq!(
            options.languages,
            vec![
                LanguageOption {
                    code: "en-US".to_string(),
                    name: "English (US)".to_string(),
                    count: 2
                },
                LanguageOption {
                    code: "de-DE".to_string(),
                    name: "German".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(options.genders[0].value, Gender::Female);
        assert_eq!(options.genders[0].label, "Female");
        assert_eq!(options.genders[0].count, 2);
        assert_eq!(options.providers[1].value, "Google");
        assert_eq!(options.categories.len(), 2);
        assert_eq!(options.age_groups[0].count, 3);
    }

    #[test]
    fn test_filter_options_empty_catalog() {
        assert_eq!(filter_options(&[]), FilterOptions::default());
    }
}
