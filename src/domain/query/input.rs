//! Query Input - 查询输入聚合
//!
//! 搜索文本、筛选条件、排序方式、视图模式均可独立修改

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::domain::voice::{AgeGroup, Gender, VoiceCategory};

/// 筛选条件
///
/// 不同维度之间为 AND，同一维度内部为 OR；空集合表示不限制
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceFilters {
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub genders: BTreeSet<Gender>,
    #[serde(default)]
    pub age_groups: BTreeSet<AgeGroup>,
    #[serde(default)]
    pub categories: BTreeSet<VoiceCategory>,
    #[serde(default)]
    pub providers: BTreeSet<String>,
    /// 三态：None 不限制，Some(true) 仅付费，Some(false) 仅免费
    #[serde(default)]
    pub is_premium: Option<bool>,
    #[serde(default)]
    pub min_rating: Option<f64>,
}

impl VoiceFilters {
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// 生效中的筛选维度数量
    pub fn active_count(&self) -> usize {
        [
            !self.languages.is_empty(),
            !self.genders.is_empty(),
            !self.age_groups.is_empty(),
            !self.categories.is_empty(),
            !self.providers.is_empty(),
            self.is_premium.is_some(),
            self.min_rating.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// 合并部分更新，未出现的维度保持不变
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(languages) = patch.languages {
            self.languages = languages;
        }
        if let Some(genders) = patch.genders {
            self.genders = genders;
        }
        if let Some(age_groups) = patch.age_groups {
            self.age_groups = age_groups;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(providers) = patch.providers {
            self.providers = providers;
        }
        if let Some(is_premium) = patch.is_premium {
            self.is_premium = is_premium;
        }
        if let Some(min_rating) = patch.min_rating {
            self.min_rating = min_rating;
        }
    }
}

/// 筛选条件的部分更新
///
/// 对于 `is_premium` / `min_rating`：字段缺省表示不修改，显式 `null` 表示重置为不限制
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[serde(default)]
    pub languages: Option<BTreeSet<String>>,
    #[serde(default)]
    pub genders: Option<BTreeSet<Gender>>,
    #[serde(default)]
    pub age_groups: Option<BTreeSet<AgeGroup>>,
    #[serde(default)]
    pub categories: Option<BTreeSet<VoiceCategory>>,
    #[serde(default)]
    pub providers: Option<BTreeSet<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub is_premium: Option<Option<bool>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub min_rating: Option<Option<f64>>,
}

/// 区分 "字段缺省" 与 "显式 null"
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Rating,
    Usage,
    Recent,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// 排序方式，默认按评分降序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::Rating, SortDirection::Desc)
    }
}

/// 视图模式（仅影响展示，不参与筛选）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// 查询输入聚合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub search_text: String,
    pub filters: VoiceFilters,
    pub sort: SortSpec,
    pub view_mode: ViewMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_input() {
        let input = QueryInput::default();
        assert!(input.search_text.is_empty());
        assert!(input.filters.is_empty());
        assert_eq!(input.sort, SortSpec::new(SortField::Rating, SortDirection::Desc));
        assert_eq!(input.view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_patch_leaves_absent_dimensions_untouched() {
        let mut filters = VoiceFilters::default();
        filters.providers.insert("Google".to_string());
        filters.is_premium = Some(true);

        let patch: FilterPatch = serde_json::from_str(r#"{"genders": ["female"]}"#).unwrap();
        filters.apply(patch);

        assert!(filters.genders.contains(&Gender::Female));
        assert!(filters.providers.contains("Google"));
        assert_eq!(filters.is_premium, Some(true));
        assert_eq!(filters.active_count(), 3);
    }

    #[test]
    fn test_patch_explicit_null_resets_tri_state() {
        let mut filters = VoiceFilters {
            is_premium: Some(false),
            min_rating: Some(4.0),
            ..Default::default()
        };

        let patch: FilterPatch = serde_json::from_str(r#"{"isPremium": null}"#).unwrap();
        assert_eq!(patch.is_premium, Some(None));
        assert_eq!(patch.min_rating, None);

        filters.apply(patch);
        assert_eq!(filters.is_premium, None);
        assert_eq!(filters.min_rating, Some(4.0));
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert_eq!(" grid\n".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert!("table".parse::<ViewMode>().is_err());
    }
}
