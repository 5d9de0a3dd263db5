//! Build configuration loaded from TOML.
//!
//! ```toml
//! output = "priv/static/assets/icons.css"
//! error_policy = "warn"
//!
//! [[icon_set]]
//! prefix = "lucide"
//! directory = "deps/lucide/icons"
//! overrides = ["assets/icons"]
//! size = "spacing.6"
//!
//! [content]
//! paths = ["lib", "assets/js"]
//! extensions = ["heex", "ex", "js"]
//!
//! [theme.spacing]
//! "10" = "2.5rem"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::{ContentSources, ErrorPolicy};
use crate::theme::Theme;
use crate::utility::{DEFAULT_PREFIX, DEFAULT_SIZE_KEY, IconOptions};
use crate::{Error, Result};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "iconmask.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    output: Option<PathBuf>,
    #[serde(default)]
    error_policy: ErrorPolicy,
    #[serde(default, rename = "icon_set")]
    icon_sets: Vec<RawIconSet>,
    #[serde(default)]
    content: RawContent,
    #[serde(default)]
    theme: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIconSet {
    prefix: Option<String>,
    directory: PathBuf,
    #[serde(default)]
    overrides: Vec<PathBuf>,
    size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContent {
    #[serde(default)]
    paths: Vec<PathBuf>,
    #[serde(default)]
    extensions: Vec<String>,
}

/// One icon directory registered as a utility family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSetConfig {
    /// Directory scanned for icons.
    pub directory: PathBuf,
    /// Directories whose icons shadow same-named ones.
    pub overrides: Vec<PathBuf>,
    /// Prefix and size key.
    pub options: IconOptions,
}

/// A path a rebuild depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchedPath {
    /// Icon directory, scanned without recursion.
    Icons(PathBuf),
    /// Content file or directory, walked recursively.
    Content(PathBuf),
}

/// Validated build configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Stylesheet to write; `None` means standard output.
    pub output: Option<PathBuf>,
    /// Handling of per-utility failures.
    pub error_policy: ErrorPolicy,
    /// Icon families, in declaration order.
    pub icon_sets: Vec<IconSetConfig>,
    /// Consumer sources scanned for candidates.
    pub content: ContentSources,
    /// Default theme with the configured overrides applied.
    pub theme: Theme,
}

impl BuildConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text, path)
    }

    /// Parse config text; `source` names the file and anchors relative paths.
    pub fn from_toml_str(text: &str, source: &Path) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(text).map_err(|e| Error::config(source, e.message().to_string()))?;
        let base = source.parent().unwrap_or_else(|| Path::new(""));

        if raw.icon_sets.is_empty() {
            return Err(Error::config(source, "at least one [[icon_set]] is required"));
        }

        let mut seen = HashSet::new();
        let mut icon_sets = Vec::with_capacity(raw.icon_sets.len());
        for set in raw.icon_sets {
            let prefix = set.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
            validate_prefix(&prefix).map_err(|message| Error::config(source, message))?;
            if !seen.insert(prefix.clone()) {
                return Err(Error::config(
                    source,
                    format!("icon set prefix '{prefix}' is used twice"),
                ));
            }

            let options = IconOptions::new(prefix)
                .with_size_key(set.size.unwrap_or_else(|| DEFAULT_SIZE_KEY.to_string()));
            icon_sets.push(IconSetConfig {
                directory: base.join(set.directory),
                overrides: set.overrides.into_iter().map(|p| base.join(p)).collect(),
                options,
            });
        }

        let mut overrides = Theme::empty();
        for (scale, steps) in &raw.theme {
            for (step, value) in steps {
                overrides
                    .set_str(&format!("{scale}.{step}"), value)
                    .map_err(|e| Error::config(source, e.to_string()))?;
            }
        }
        let mut theme = Theme::default();
        theme.merge(&overrides);

        let content = ContentSources::new(raw.content.paths.into_iter().map(|p| base.join(p)))
            .with_extensions(raw.content.extensions);

        Ok(Self {
            output: raw.output.map(|p| base.join(p)),
            error_policy: raw.error_policy,
            icon_sets,
            content,
            theme,
        })
    }

    /// Every path a rebuild depends on, icon directories first.
    pub fn watched_paths(&self) -> Vec<WatchedPath> {
        let mut paths = Vec::new();
        for set in &self.icon_sets {
            paths.push(WatchedPath::Icons(set.directory.clone()));
            paths.extend(set.overrides.iter().cloned().map(WatchedPath::Icons));
        }
        paths.extend(self.content.paths.iter().cloned().map(WatchedPath::Content));
        paths
    }
}

fn validate_prefix(prefix: &str) -> std::result::Result<(), String> {
    if prefix.is_empty() {
        return Err("icon set prefix must not be empty".to_string());
    }
    if prefix.starts_with('-') || prefix.ends_with('-') {
        return Err(format!("icon set prefix '{prefix}' must not start or end with '-'"));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "icon set prefix '{prefix}' may only contain letters, digits, '-' and '_'"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeLookup;

    fn parse(text: &str) -> Result<BuildConfig> {
        BuildConfig::from_toml_str(text, Path::new("/project/iconmask.toml"))
    }

    #[test]
    fn full_config() {
        let config = parse(
            r#"
            output = "priv/static/icons.css"
            error_policy = "warn"

            [[icon_set]]
            prefix = "lucide"
            directory = "deps/lucide/icons"
            overrides = ["assets/icons"]
            size = "spacing.6"

            [[icon_set]]
            directory = "assets/brand"

            [content]
            paths = ["lib"]
            extensions = ["heex"]

            [theme.spacing]
            "10" = "44px"
            "#,
        )
        .unwrap();

        assert_eq!(config.output, Some(PathBuf::from("/project/priv/static/icons.css")));
        assert_eq!(config.error_policy, ErrorPolicy::Warn);
        assert_eq!(config.icon_sets.len(), 2);

        let lucide = &config.icon_sets[0];
        assert_eq!(lucide.options.prefix, "lucide");
        assert_eq!(lucide.options.size_key, "spacing.6");
        assert_eq!(lucide.directory, PathBuf::from("/project/deps/lucide/icons"));
        assert_eq!(lucide.overrides, vec![PathBuf::from("/project/assets/icons")]);

        let brand = &config.icon_sets[1];
        assert_eq!(brand.options.prefix, DEFAULT_PREFIX);
        assert_eq!(brand.options.size_key, DEFAULT_SIZE_KEY);

        assert_eq!(config.content.paths, vec![PathBuf::from("/project/lib")]);
        assert_eq!(config.content.extensions, vec!["heex".to_string()]);
        assert_eq!(config.theme.resolve("spacing.10").unwrap().as_str(), "44px");
        assert_eq!(config.theme.resolve("spacing.6").unwrap().as_str(), "1.5rem");
        assert_eq!(
            config.watched_paths(),
            vec![
                WatchedPath::Icons(PathBuf::from("/project/deps/lucide/icons")),
                WatchedPath::Icons(PathBuf::from("/project/assets/icons")),
                WatchedPath::Icons(PathBuf::from("/project/assets/brand")),
                WatchedPath::Content(PathBuf::from("/project/lib")),
            ]
        );
    }

    #[test]
    fn defaults() {
        let config = parse("[[icon_set]]\ndirectory = \"icons\"\n").unwrap();
        assert_eq!(config.output, None);
        assert_eq!(config.error_policy, ErrorPolicy::Fail);
        assert!(config.content.paths.is_empty());
    }

    #[test]
    fn requires_an_icon_set() {
        let err = parse("output = \"a.css\"").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn rejects_duplicate_prefixes() {
        let err = parse(
            "[[icon_set]]\ndirectory = \"a\"\n[[icon_set]]\ndirectory = \"b\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("used twice"));
    }

    #[test]
    fn rejects_bad_prefix() {
        let err = parse("[[icon_set]]\nprefix = \"ic on\"\ndirectory = \"a\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn rejects_invalid_theme_length() {
        let err = parse(
            "[[icon_set]]\ndirectory = \"a\"\n[theme.spacing]\n\"10\" = \"big\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn theme_overrides_extend_default_scale() {
        let config = parse(
            "[[icon_set]]\ndirectory = \"a\"\n[theme.icon]\nmd = \"20px\"\n[theme.spacing]\npx = \"2px\"\n",
        )
        .unwrap();

        assert_eq!(config.theme.resolve("icon.md").unwrap().as_str(), "20px");
        assert_eq!(config.theme.resolve("spacing.px").unwrap().as_str(), "2px");
        assert_eq!(config.theme.resolve("spacing.10").unwrap().as_str(), "2.5rem");
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse("[[icon_set]]\ndirectory = \"a\"\nstrip = true\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
