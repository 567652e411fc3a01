//! Query Engine - 可见列表派生
//!
//! 纯函数：`(catalog, favorites, input) -> visible`，无副作用，任何输入变化后重新计算。
//! 分页截断不属于这里的职责。

use std::cmp::Ordering;
use std::sync::Arc;

use super::{QueryInput, SortDirection, SortField, VoiceFilters};
use crate::domain::favorites::FavoritesSet;
use crate::domain::voice::Voice;

/// 可见列表中的一项：目录记录 + 派生的收藏标记
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleVoice {
    pub voice: Arc<Voice>,
    pub is_favorite: bool,
}

/// 计算可见列表
///
/// 1. 搜索文本（小写子串匹配 名称 / 语言 / 风格 / 标签）
/// 2. 筛选条件（维度之间 AND，维度内部 OR）
/// 3. 收藏标记
/// 4. 排序（稳定排序，相同主键保持目录顺序）
pub fn compute_visible(
    catalog: &[Arc<Voice>],
    favorites: &FavoritesSet,
    input: &QueryInput,
) -> Vec<VisibleVoice> {
    let needle = input.search_text.to_lowercase();

    let mut visible: Vec<VisibleVoice> = catalog
        .iter()
        .filter(|voice| needle.is_empty() || matches_search(voice, &needle))
        .filter(|voice| matches_filters(voice, &input.filters))
        .map(|voice| VisibleVoice {
            voice: Arc::clone(voice),
            is_favorite: favorites.contains(voice.id()),
        })
        .collect();

    let field = input.sort.field;
    match input.sort.direction {
        SortDirection::Asc => visible.sort_by(|a, b| compare_by(field, &a.voice, &b.voice)),
        SortDirection::Desc => {
            visible.sort_by(|a, b| compare_by(field, &a.voice, &b.voice).reverse())
        }
    }

    visible
}

fn matches_search(voice: &Voice, needle: &str) -> bool {
    voice.display_name().to_lowercase().contains(needle)
        || voice.language_name().to_lowercase().contains(needle)
        || voice.style().to_lowercase().contains(needle)
        || voice
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn matches_filters(voice: &Voice, filters: &VoiceFilters) -> bool {
    if !filters.languages.is_empty() && !filters.languages.contains(voice.language_code()) {
        return false;
    }
    if !filters.genders.is_empty() && !filters.genders.contains(&voice.gender()) {
        return false;
    }
    if !filters.age_groups.is_empty() && !filters.age_groups.contains(&voice.age_group()) {
        return false;
    }
    if !filters.categories.is_empty() && !filters.categories.contains(&voice.category()) {
        return false;
    }
    if !filters.providers.is_empty() && !filters.providers.contains(voice.provider()) {
        return false;
    }
    if let Some(is_premium) = filters.is_premium {
        if voice.is_premium() != is_premium {
            return false;
        }
    }
    if let Some(min_rating) = filters.min_rating {
        if voice.rating() < min_rating {
            return false;
        }
    }
    true
}

/// 升序比较器，降序时由调用方取反
fn compare_by(field: SortField, a: &Voice, b: &Voice) -> Ordering {
    match field {
        SortField::Name => a.display_name().cmp(b.display_name()),
        SortField::Rating => a.rating().total_cmp(&b.rating()),
        SortField::Usage => a.usage_count().cmp(&b.usage_count()),
        SortField::Recent => a.is_new().cmp(&b.is_new()),
    }
}
