//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色目录记录
//! - Query Context: 搜索、筛选、排序与可见列表派生
//!
//! 以及共享值对象：收藏集合、试听会话

mod favorites;
mod preview;
pub mod query;
pub mod voice;

pub use favorites::FavoritesSet;
pub use preview::{PlaybackState, PreviewFailure, PreviewSession};
