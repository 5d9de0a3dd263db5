//! One complete build: catalogs, registration, content scan, generation.

use std::path::Path;

use crate::catalog::CatalogLoader;
use crate::config::BuildConfig;
use crate::engine::{GeneratedCss, UtilityEngine};
use crate::utility::IconUtilities;
use crate::{Error, Result};

/// Load every icon set of `config` and register it with a fresh engine.
///
/// Catalogs are rebuilt from disk on every call.
pub fn engine_from_config(config: &BuildConfig) -> Result<UtilityEngine> {
    let mut engine = UtilityEngine::new(config.theme.clone());

    for set in &config.icon_sets {
        let mut loader = CatalogLoader::new();
        for path in &set.overrides {
            loader.add_override(path);
        }

        let plugin = IconUtilities::new(loader.load(&set.directory)?).with_options(set.options.clone());
        engine.register_plugin(&plugin)?;
    }

    Ok(engine)
}

/// Run a full build and apply the configured error policy.
pub fn run_build(config: &BuildConfig) -> Result<GeneratedCss> {
    let engine = engine_from_config(config)?;
    let candidates = config.content.scan()?;
    engine.generate(&candidates).into_result(config.error_policy)
}

/// Write a generated stylesheet, creating parent directories.
pub fn write_stylesheet(path: &Path, css: &GeneratedCss) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, css.to_css()).map_err(|e| Error::io(path, e))?;
    tracing::info!("Wrote {} rules to {}", css.rules.len(), path.display());
    Ok(())
}
