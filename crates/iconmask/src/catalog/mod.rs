//! Icon catalog built from a directory of SVG files.
//!
//! A catalog maps every icon name to the file it comes from. It is built once
//! per build and never cached: a rebuild always rescans the directory.
//!
//! # Example
//!
//! ```ignore
//! use iconmask::catalog::{load_catalog, CatalogLoader};
//!
//! let catalog = load_catalog("deps/lucide/icons")?;
//! assert!(catalog.contains("house"));
//!
//! // Project icons shadow vendored ones with the same name
//! let catalog = CatalogLoader::new()
//!     .with_override("assets/icons")
//!     .load("deps/lucide/icons")?;
//! ```

mod loader;
mod types;

pub use loader::{CatalogLoader, SVG_SUFFIX, icon_name, load_catalog};
pub use types::{IconAsset, IconCatalog, ValuesTable};
