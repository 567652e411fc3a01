//! 收藏集合值对象

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::voice::VoiceId;

/// 收藏的音色 ID 集合
///
/// 不可变值：每次切换都产生新的集合，旧快照保持不变。
/// 内部使用 `Arc` 共享，克隆开销很小。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet(Arc<BTreeSet<VoiceId>>);

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &VoiceId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoiceId> {
        self.0.iter()
    }

    /// 返回切换 `id` 成员关系后的新集合
    ///
    /// 对同一 id 连续调用两次得到原集合
    pub fn toggled(&self, id: &VoiceId) -> Self {
        let mut ids = (*self.0).clone();
        if !ids.remove(id) {
            ids.insert(id.clone());
        }
        Self(Arc::new(ids))
    }
}

impl FromIterator<VoiceId> for FavoritesSet {
    fn from_iter<T: IntoIterator<Item = VoiceId>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

// 持久化格式：ID 的 JSON 数组
impl Serialize for FavoritesSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for FavoritesSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<VoiceId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
