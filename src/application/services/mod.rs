//! Application Services - 用例编排
//!
//! 每个组件独占自己的状态，VoiceExplorer 负责组合

mod catalog_store;
mod debouncer;
mod favorites_ledger;
mod pagination_controller;
mod preview_coordinator;
mod voice_explorer;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog_store::{SharedCatalogStore, VoiceCatalogStore};
pub use debouncer::Debouncer;
pub use favorites_ledger::FavoritesLedger;
pub use pagination_controller::{LoadOutcome, PaginationController, PaginationSnapshot};
pub use preview_coordinator::{PreviewCoordinator, PreviewError, PreviewOutcome};
pub use voice_explorer::{ExplorerPorts, ExplorerSettings, ExplorerSnapshot, VoiceExplorer};
