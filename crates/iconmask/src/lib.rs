//! Mask-based CSS icon utilities generated from SVG directories.
//!
//! This crate turns a directory of SVG files into utility classes such as
//! `icon-home`, featuring:
//!
//! - **Catalogs**: One non-recursive directory scan per build
//! - **Lazy generation**: Markup is read only for utilities the build uses
//! - **Masking**: Icons render in `currentColor` through `mask` and a data URI
//! - **Theme sizing**: Width and height come from a theme scale key
//! - **Hot Reload**: Rebuild when icons or sources change
//!
//! # Example
//!
//! ```ignore
//! use iconmask::prelude::*;
//!
//! let icons = IconUtilities::from_directory("deps/lucide/icons")?
//!     .with_options(IconOptions::new("lucide"));
//!
//! let mut engine = UtilityEngine::new(Theme::default());
//! engine.register_plugin(&icons)?;
//!
//! let candidates = ContentSources::new(["lib"]).with_extensions(["heex"]).scan()?;
//! let css = engine.generate(&candidates).into_result(ErrorPolicy::Fail)?;
//! println!("{}", css.to_css());
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod markup;
pub mod pipeline;
pub mod plugin;
pub mod theme;
pub mod utility;

#[cfg(feature = "hot-reload")]
pub mod hot_reload;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::catalog::{CatalogLoader, IconAsset, IconCatalog, ValuesTable, load_catalog};
    pub use crate::config::BuildConfig;
    pub use crate::engine::{
        ContentSources, ErrorPolicy, GeneratedCss, UtilityEngine, extract_candidates,
    };
    pub use crate::pipeline::{engine_from_config, run_build, write_stylesheet};
    pub use crate::plugin::{Generator, Generators, Plugin, PluginApi};
    pub use crate::theme::{CssLength, Theme, ThemeHandle, ThemeLookup};
    pub use crate::utility::{
        IconOptions, IconUtilities, UtilityDeclaration, UtilityRule, register_icon_utilities,
    };

    #[cfg(feature = "hot-reload")]
    pub use crate::hot_reload::AssetWatcher;
}
