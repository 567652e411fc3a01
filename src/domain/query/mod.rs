//! Query Context - 音色发现查询
//!
//! 职责:
//! - 查询输入（搜索 / 筛选 / 排序 / 视图模式）
//! - 可见列表派生（纯函数）
//! - 筛选面板选项统计

mod engine;
mod facets;
mod input;

pub use engine::{compute_visible, VisibleVoice};
pub use facets::{filter_options, FacetOption, FilterOptions, LanguageOption};
pub use input::{
    FilterPatch, QueryInput, SortDirection, SortField, SortSpec, ViewMode, VoiceFilters,
};
