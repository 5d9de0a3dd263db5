//! Theme scales addressed by dotted keys.

use std::collections::BTreeMap;

use super::CssLength;
use crate::{Error, Result};

/// Steps of the default spacing scale, in multiples of `0.25rem`.
const SPACING_STEPS: &[f64] = &[
    0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 14.0,
    16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 52.0, 56.0, 60.0, 64.0, 72.0, 80.0, 96.0,
];

/// Resolves a dotted scale key (`spacing.10`) to a length.
///
/// This is the theme half of the plugin protocol: generators call it each
/// time they run, so the result always reflects the current theme.
pub trait ThemeLookup {
    /// Resolve `key` to a concrete length.
    fn resolve(&self, key: &str) -> Result<CssLength>;
}

/// Named scales of lengths (`spacing`, `size`, ...).
///
/// Keys have the form `<scale>.<step>`; the step may itself contain dots
/// (`spacing.0.5`). A leading `--` is ignored.
///
/// # Example
///
/// ```
/// use iconmask::theme::{Theme, ThemeLookup};
///
/// let theme = Theme::default();
/// assert_eq!(theme.resolve("spacing.10").unwrap().as_str(), "2.5rem");
/// assert_eq!(theme.resolve("spacing.px").unwrap().as_str(), "1px");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    scales: BTreeMap<String, BTreeMap<String, CssLength>>,
}

impl Theme {
    /// Create a theme with no scales.
    pub fn empty() -> Self {
        Self {
            scales: BTreeMap::new(),
        }
    }

    /// Set a step, replacing any previous value.
    ///
    /// Returns an error when `key` has no step part.
    pub fn set(&mut self, key: &str, value: CssLength) -> Result<()> {
        let (scale, step) = split_key(key)?;
        self.scales
            .entry(scale.to_string())
            .or_default()
            .insert(step.to_string(), value);
        Ok(())
    }

    /// Parse and set a step.
    pub fn set_str(&mut self, key: &str, value: &str) -> Result<()> {
        let length =
            CssLength::parse(value).map_err(|message| Error::invalid_length(key, value, message))?;
        self.set(key, length)
    }

    /// Get a step value.
    pub fn get(&self, key: &str) -> Option<&CssLength> {
        let (scale, step) = split_key(key).ok()?;
        self.scales.get(scale)?.get(step)
    }

    /// Check if a key resolves.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Names of all scales.
    pub fn scale_names(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(|s| s.as_str())
    }

    /// Copy every step of `other` into this theme.
    pub fn merge(&mut self, other: &Theme) {
        for (scale, steps) in &other.scales {
            let target = self.scales.entry(scale.clone()).or_default();
            for (step, value) in steps {
                target.insert(step.clone(), value.clone());
            }
        }
    }
}

impl Default for Theme {
    /// The default spacing scale: `px = 1px`, `0 = 0px`, `n = n * 0.25rem`.
    fn default() -> Self {
        let mut spacing = BTreeMap::new();
        spacing.insert("px".to_string(), CssLength::px(1.0));
        for step in SPACING_STEPS {
            spacing.insert(format!("{step}"), CssLength::rem(step * 0.25));
        }

        let mut scales = BTreeMap::new();
        scales.insert("spacing".to_string(), spacing);
        Self { scales }
    }
}

impl ThemeLookup for Theme {
    fn resolve(&self, key: &str) -> Result<CssLength> {
        self.get(key).cloned().ok_or_else(|| Error::UnknownThemeKey {
            key: key.to_string(),
        })
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    let trimmed = key.strip_prefix("--").unwrap_or(key);
    match trimmed.split_once('.') {
        Some((scale, step)) if !scale.is_empty() && !step.is_empty() => Ok((scale, step)),
        _ => Err(Error::UnknownThemeKey {
            key: key.to_string(),
        }),
    }
}
