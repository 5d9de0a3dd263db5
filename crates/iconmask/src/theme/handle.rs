//! Shared, swappable theme.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{CssLength, Theme, ThemeLookup};
use crate::Result;

/// Cloneable handle to the active theme.
///
/// Generators hold a clone and resolve through it at generation time, so a
/// theme swapped in after registration is picked up without rescanning any
/// icon directory.
#[derive(Debug, Clone, Default)]
pub struct ThemeHandle {
    inner: Arc<RwLock<Theme>>,
}

impl ThemeHandle {
    /// Wrap a theme.
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Arc::new(RwLock::new(theme)),
        }
    }

    /// Replace the active theme.
    pub fn set_theme(&self, theme: Theme) {
        *self.inner.write() = theme;
    }

    /// Modify the active theme in place.
    pub fn update(&self, f: impl FnOnce(&mut Theme)) {
        f(&mut self.inner.write());
    }
}

impl ThemeLookup for ThemeHandle {
    fn resolve(&self, key: &str) -> Result<CssLength> {
        self.inner.read().resolve(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_theme_swaps() {
        let handle = ThemeHandle::new(Theme::default());
        let generator_side = handle.clone();

        assert_eq!(generator_side.resolve("spacing.10").unwrap().as_str(), "2.5rem");

        let mut theme = Theme::empty();
        theme.set_str("spacing.10", "2rem").unwrap();
        handle.set_theme(theme);

        assert_eq!(generator_side.resolve("spacing.10").unwrap().as_str(), "2rem");
    }

    #[test]
    fn update_in_place() {
        let handle = ThemeHandle::default();
        handle.update(|theme| {
            theme.set_str("spacing.10", "44px").unwrap();
        });
        assert_eq!(handle.resolve("spacing.10").unwrap().as_str(), "44px");
    }
}
