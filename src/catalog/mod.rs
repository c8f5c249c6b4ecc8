mod catalog;
mod category;
mod error;
mod parsing;
mod tle_loader;
mod types;

pub use catalog::{Catalog, DEFAULT_CATALOG_LIMIT};
pub use category::Category;
pub use error::CatalogError;
pub use parsing::{extract_catalog_number, parse_tle_text};
pub use tle_loader::{load_with_fallback, CatalogSource, StaticEntries, TleDirectory};
pub use types::{RawEntry, TrackedObject};
