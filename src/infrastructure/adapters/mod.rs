//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod catalog;

pub use audio::*;
pub use catalog::*;
