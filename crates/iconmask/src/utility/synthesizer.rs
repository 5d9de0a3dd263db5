//! Icon utility synthesis.
//!
//! [`IconUtilities`] is the plugin that turns an [`IconCatalog`] into a
//! matchable utility family. The generator it registers reads and transforms
//! markup lazily, so only icons referenced by the build are ever read.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::declaration::{UtilityDeclaration, escape_identifier};
use crate::catalog::{CatalogLoader, IconAsset, IconCatalog};
use crate::markup::{css_url, transform_markup};
use crate::plugin::{Generator, Plugin, PluginApi};
use crate::theme::ThemeLookup;
use crate::{Error, Result};

/// Default utility family prefix.
pub const DEFAULT_PREFIX: &str = "icon";

/// Default theme key for width and height.
pub const DEFAULT_SIZE_KEY: &str = "spacing.10";

/// Per-family settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOptions {
    /// Utility family prefix; utilities are named `<prefix>-<icon>`.
    pub prefix: String,
    /// Theme key resolved for `width` and `height`.
    pub size_key: String,
}

impl IconOptions {
    /// Options with the given prefix and the default size key.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            size_key: DEFAULT_SIZE_KEY.to_string(),
        }
    }

    /// Set the size key.
    pub fn with_size_key(mut self, key: impl Into<String>) -> Self {
        self.size_key = key.into();
        self
    }

    /// Custom property holding the data URI of `icon`.
    pub fn custom_property(&self, icon: &str) -> String {
        escape_identifier(&format!("--{}-{}", self.prefix, icon))
    }

    /// Utility class name of `icon`.
    pub fn utility_name(&self, icon: &str) -> String {
        format!("{}-{}", self.prefix, icon)
    }
}

impl Default for IconOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Plugin registering one icon family built from a catalog.
///
/// # Example
///
/// ```ignore
/// use iconmask::prelude::*;
///
/// let icons = IconUtilities::from_directory("deps/lucide/icons")?
///     .with_options(IconOptions::new("lucide"));
///
/// let mut engine = UtilityEngine::new(Theme::default());
/// engine.register_plugin(&icons)?;
/// let css = engine.generate(["lucide-house"]).into_result(ErrorPolicy::Fail)?;
/// ```
#[derive(Debug, Clone)]
pub struct IconUtilities {
    catalog: IconCatalog,
    options: IconOptions,
}

impl IconUtilities {
    /// Wrap an existing catalog with default options.
    pub fn new(catalog: IconCatalog) -> Self {
        Self {
            catalog,
            options: IconOptions::default(),
        }
    }

    /// Load the catalog from `directory`.
    pub fn from_directory(directory: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(CatalogLoader::new().load(directory)?))
    }

    /// Replace the options.
    pub fn with_options(mut self, options: IconOptions) -> Self {
        self.options = options;
        self
    }

    /// The catalog.
    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    /// The options.
    pub fn options(&self) -> &IconOptions {
        &self.options
    }
}

impl Plugin for IconUtilities {
    fn name(&self) -> &str {
        &self.options.prefix
    }

    fn register(&self, api: &mut dyn PluginApi) -> Result<()> {
        register_icon_utilities(&self.catalog, &self.options, api)
    }
}

/// Register the icon family of `catalog` with a host.
///
/// The values table is the catalog content, passed through unchanged. The
/// generator captures only the options and the theme handle.
pub fn register_icon_utilities(
    catalog: &IconCatalog,
    options: &IconOptions,
    api: &mut dyn PluginApi,
) -> Result<()> {
    let theme = api.theme();
    let captured = options.clone();
    let generator: Generator =
        Arc::new(move |asset: &IconAsset| synthesize(asset, &captured, &theme));

    let mut generators = BTreeMap::new();
    generators.insert(options.prefix.clone(), generator);

    tracing::debug!(
        "Registering '{}' with {} icons from {}",
        options.prefix,
        catalog.len(),
        catalog.directory().display()
    );
    api.match_utilities(generators, catalog.values().clone())
}

/// Build the declaration block for one icon.
///
/// Reads the asset file, so a file deleted after the catalog was built
/// surfaces as [`Error::AssetRead`].
pub fn synthesize(
    asset: &IconAsset,
    options: &IconOptions,
    theme: &dyn ThemeLookup,
) -> Result<UtilityDeclaration> {
    let raw = fs::read(asset.path()).map_err(|e| Error::asset_read(asset.name(), asset.path(), e))?;
    let markup = transform_markup(asset.name(), &raw)?;
    let size = theme.resolve(&options.size_key)?;

    tracing::debug!(
        "Generated {} ({} bytes of markup)",
        options.utility_name(asset.name()),
        markup.len()
    );
    Ok(icon_declaration(
        &options.custom_property(asset.name()),
        &markup,
        size.as_str(),
    ))
}

/// The fixed declaration block around a transformed icon.
pub fn icon_declaration(custom_property: &str, markup: &str, size: &str) -> UtilityDeclaration {
    let reference = format!("var({custom_property})");
    UtilityDeclaration::new()
        .with(custom_property, css_url(markup))
        .with("-webkit-mask", reference.clone())
        .with("mask", reference)
        .with("-webkit-mask-size", "contain")
        .with("mask-size", "contain")
        .with("background-color", "currentColor")
        .with("vertical-align", "middle")
        .with("display", "inline-block")
        .with("width", size)
        .with("height", size)
}
