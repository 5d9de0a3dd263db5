//! Icon directory scanning.
//!
//! The loader lists one directory (non-recursively), keeps regular files with
//! the SVG suffix and maps each to an [`IconAsset`] named after the file stem.
//! Entries are processed in lexicographic file-name order so that the result
//! never depends on the order the filesystem happens to list them in.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{IconAsset, IconCatalog};
use crate::{Error, Result};

/// The only icon file suffix the loader accepts.
pub const SVG_SUFFIX: &str = ".svg";

/// Scan `directory` into a catalog using the default loader.
///
/// Fails with [`Error::CatalogSourceUnavailable`] when the directory is
/// missing or cannot be listed.
pub fn load_catalog(directory: impl AsRef<Path>) -> Result<IconCatalog> {
    CatalogLoader::new().load(directory)
}

/// Icon catalog loader.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    /// Override directories, applied in order after the base directory.
    overrides: Vec<PathBuf>,
}

impl CatalogLoader {
    /// Create a loader with no override directories.
    pub fn new() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }

    /// Add an override directory.
    ///
    /// Icons found there replace same-named icons from the base directory and
    /// from earlier overrides.
    pub fn add_override(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.overrides.contains(&path) {
            self.overrides.push(path);
        }
    }

    /// Builder form of [`add_override`](Self::add_override).
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_override(path);
        self
    }

    /// Current override directories.
    pub fn overrides(&self) -> &[PathBuf] {
        &self.overrides
    }

    /// Build a catalog from `directory` plus any override directories.
    pub fn load(&self, directory: impl AsRef<Path>) -> Result<IconCatalog> {
        let directory = resolve_directory(directory.as_ref())?;

        let mut assets = scan_directory(&directory)?;
        for path in &self.overrides {
            let overlay = resolve_directory(path)?;
            assets.extend(scan_directory(&overlay)?);
        }

        let catalog = IconCatalog::from_assets(&directory, assets);
        tracing::debug!(
            "Loaded {} icons from {}",
            catalog.len(),
            directory.display()
        );
        Ok(catalog)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the SVG suffix from a file name, rejecting empty stems.
pub fn icon_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(SVG_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

fn resolve_directory(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .map_err(|e| Error::catalog_source(path, e))
}

/// List qualifying files of one directory, sorted by file name.
fn scan_directory(directory: &Path) -> Result<Vec<IconAsset>> {
    let entries = fs::read_dir(directory).map_err(|e| Error::catalog_source(directory, e))?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::catalog_source(directory, e))?;

        // Symlinks are not followed; only regular files count.
        let is_file = entry
            .file_type()
            .map_err(|e| Error::catalog_source(entry.path(), e))?
            .is_file();
        if !is_file {
            continue;
        }

        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!("Skipping non UTF-8 icon file name {:?}", raw);
                continue;
            }
        };

        if icon_name(&file_name).is_some() {
            files.push((file_name, entry.path()));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(files
        .into_iter()
        .filter_map(|(file_name, path)| {
            icon_name(&file_name).map(|name| IconAsset::new(name, path))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str) {
        fs::write(dir.join(name), "<svg></svg>").unwrap();
    }

    #[test]
    fn icon_name_strips_suffix() {
        assert_eq!(icon_name("home.svg"), Some("home"));
        assert_eq!(icon_name("arrow-left.svg"), Some("arrow-left"));
        assert_eq!(icon_name("archive.tar.svg"), Some("archive.tar"));
        assert_eq!(icon_name(".svg"), None);
        assert_eq!(icon_name("home.SVG"), None);
        assert_eq!(icon_name("home.png"), None);
    }

    #[test]
    fn load_keeps_only_svg_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "home.svg");
        write(temp.path(), "star.svg");
        write(temp.path(), "notes.txt");
        write(temp.path(), "logo.png");
        fs::create_dir(temp.path().join("nested.svg")).unwrap();
        write(&temp.path().join("nested.svg"), "deep.svg");

        let catalog = load_catalog(temp.path()).unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["home", "star"]);
    }

    #[test]
    fn load_resolves_absolute_paths() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "home.svg");

        let catalog = load_catalog(temp.path()).unwrap();
        let asset = catalog.get("home").unwrap();

        assert!(asset.path().is_absolute());
        assert!(asset.path().ends_with("home.svg"));
        assert_eq!(catalog.directory(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn missing_directory_is_catalog_source_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let err = load_catalog(&missing).unwrap_err();
        assert!(matches!(err, Error::CatalogSourceUnavailable { .. }));
    }

    #[test]
    fn file_instead_of_directory_is_catalog_source_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "home.svg");

        let err = load_catalog(temp.path().join("home.svg")).unwrap_err();
        assert!(matches!(err, Error::CatalogSourceUnavailable { .. }));
    }

    #[test]
    fn overrides_replace_same_named_icons() {
        let base = TempDir::new().unwrap();
        let custom = TempDir::new().unwrap();
        write(base.path(), "home.svg");
        write(base.path(), "star.svg");
        write(custom.path(), "home.svg");

        let catalog = CatalogLoader::new()
            .with_override(custom.path())
            .load(base.path())
            .unwrap();

        assert_eq!(catalog.len(), 2);
        let home = catalog.get("home").unwrap();
        assert!(home.path().starts_with(custom.path().canonicalize().unwrap()));
        let star = catalog.get("star").unwrap();
        assert!(star.path().starts_with(base.path().canonicalize().unwrap()));
    }

    #[test]
    fn add_override_does_not_duplicate() {
        let mut loader = CatalogLoader::new();
        loader.add_override("/custom/icons");
        loader.add_override("/custom/icons");
        assert_eq!(loader.overrides().len(), 1);
    }
}
