//! Catalog Adapter - 目录源实现

mod fake_catalog_source;
mod http_catalog_source;

pub use fake_catalog_source::{FakeCatalogSource, FakeCatalogSourceConfig};
pub use http_catalog_source::{HttpCatalogSource, HttpCatalogSourceConfig};
