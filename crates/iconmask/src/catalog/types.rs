//! Core types for the icon catalog.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single icon file found in an icon directory.
///
/// `name` is the file name without the `.svg` suffix; `path` is the
/// absolute location the markup is read from at generation time.
///
/// # Examples
///
/// ```
/// use iconmask::catalog::IconAsset;
///
/// let asset = IconAsset::new("home", "/icons/home.svg");
/// assert_eq!(asset.name(), "home");
/// assert_eq!(asset.path().to_str(), Some("/icons/home.svg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconAsset {
    name: String,
    path: PathBuf,
}

impl IconAsset {
    /// Create an asset reference.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The utility-facing icon name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved filesystem location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for IconAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.path.display())
    }
}

/// The table of valid names handed to the host together with the generators.
///
/// It is the catalog content itself, passed through unchanged.
pub type ValuesTable = BTreeMap<String, IconAsset>;

/// Name-ordered mapping from icon name to asset, built once per build.
///
/// The catalog is immutable once loaded; a rebuild produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconCatalog {
    directory: PathBuf,
    icons: ValuesTable,
}

impl IconCatalog {
    /// Create a catalog from already resolved assets.
    ///
    /// Later assets replace earlier ones with the same name.
    pub fn from_assets(
        directory: impl Into<PathBuf>,
        assets: impl IntoIterator<Item = IconAsset>,
    ) -> Self {
        let mut icons = ValuesTable::new();
        for asset in assets {
            icons.insert(asset.name.clone(), asset);
        }
        Self {
            directory: directory.into(),
            icons,
        }
    }

    /// The directory this catalog was scanned from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Look up an icon by name.
    pub fn get(&self, name: &str) -> Option<&IconAsset> {
        self.icons.get(name)
    }

    /// Check if an icon exists.
    pub fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Whether the catalog has no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Icon names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(|s| s.as_str())
    }

    /// The values table for host registration.
    pub fn values(&self) -> &ValuesTable {
        &self.icons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_assets_replace_earlier_ones() {
        let catalog = IconCatalog::from_assets(
            "/icons",
            [
                IconAsset::new("home", "/a/home.svg"),
                IconAsset::new("home", "/b/home.svg"),
                IconAsset::new("star", "/a/star.svg"),
            ],
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get("home").map(|a| a.path()),
            Some(Path::new("/b/home.svg"))
        );
    }

    #[test]
    fn names_are_ordered() {
        let catalog = IconCatalog::from_assets(
            "/icons",
            [
                IconAsset::new("zap", "/icons/zap.svg"),
                IconAsset::new("anchor", "/icons/anchor.svg"),
            ],
        );

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["anchor", "zap"]);
    }
}
