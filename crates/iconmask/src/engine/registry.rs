//! The utility engine: the host side of the plugin protocol.

use std::collections::{BTreeMap, BTreeSet};

use super::output::{GeneratedCss, GenerationFailure};
use crate::catalog::{IconAsset, ValuesTable};
use crate::plugin::{Generator, Generators, Plugin, PluginApi};
use crate::theme::{Theme, ThemeHandle};
use crate::utility::UtilityRule;
use crate::{Error, Result};

/// A registered utility family.
struct Family {
    generator: Generator,
    values: ValuesTable,
}

impl std::fmt::Debug for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Family")
            .field("values", &self.values.len())
            .finish_non_exhaustive()
    }
}

/// Registry of matchable utility families.
///
/// Plugins register families once; [`generate`](Self::generate) then turns
/// the candidates found in consumer markup into rules, invoking each
/// family's generator only for names in its values table.
///
/// # Example
///
/// ```ignore
/// let mut engine = UtilityEngine::new(Theme::default());
/// engine.register_plugin(&IconUtilities::from_directory("icons")?)?;
///
/// let candidates = extract_candidates(r#"<span class="icon-home"></span>"#);
/// let css = engine.generate(&candidates).into_result(ErrorPolicy::Fail)?;
/// ```
#[derive(Debug)]
pub struct UtilityEngine {
    theme: ThemeHandle,
    families: BTreeMap<String, Family>,
}

impl UtilityEngine {
    /// Create an engine with the given theme.
    pub fn new(theme: Theme) -> Self {
        Self::with_theme_handle(ThemeHandle::new(theme))
    }

    /// Create an engine sharing an existing theme handle.
    pub fn with_theme_handle(theme: ThemeHandle) -> Self {
        Self {
            theme,
            families: BTreeMap::new(),
        }
    }

    /// Let a plugin register its families.
    pub fn register_plugin(&mut self, plugin: &dyn Plugin) -> Result<()> {
        tracing::debug!("Registering plugin '{}'", plugin.name());
        plugin.register(self)
    }

    /// Every utility name the engine can generate, in order.
    pub fn utility_names(&self) -> Vec<String> {
        self.families
            .iter()
            .flat_map(|(prefix, family)| {
                family.values.keys().map(move |value| format!("{prefix}-{value}"))
            })
            .collect()
    }

    /// Resolve a candidate to its family prefix and value.
    ///
    /// When prefixes overlap (`icon` and `icon-solid`), the longest prefix
    /// whose values table has the remainder wins.
    pub fn resolve(&self, candidate: &str) -> Option<(&str, &IconAsset)> {
        let mut best: Option<(&str, &IconAsset)> = None;

        for (prefix, family) in &self.families {
            let Some(value) = candidate
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                continue;
            };

            if let Some(asset) = family.values.get(value) {
                if best.is_none_or(|(current, _)| prefix.len() > current.len()) {
                    best = Some((prefix.as_str(), asset));
                }
            }
        }

        best
    }

    /// Generate rules for the given candidates.
    ///
    /// Each distinct candidate that resolves is generated exactly once;
    /// candidates outside every values table are ignored without error. A
    /// failing utility is recorded and does not affect the others.
    pub fn generate<I, S>(&self, candidates: I) -> GeneratedCss
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = candidates
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();

        let mut output = GeneratedCss::default();
        for candidate in &distinct {
            let Some((prefix, asset)) = self.resolve(candidate) else {
                continue;
            };
            let Some(family) = self.families.get(prefix) else {
                continue;
            };

            match (family.generator)(asset) {
                Ok(declaration) => output.rules.push(UtilityRule::new(candidate, declaration)),
                Err(error) => output.failures.push(GenerationFailure {
                    utility: candidate.clone(),
                    error,
                }),
            }
        }

        tracing::info!(
            "Generated {} utilities ({} failed) from {} candidates",
            output.rules.len(),
            output.failures.len(),
            distinct.len()
        );
        output
    }
}

impl Default for UtilityEngine {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl PluginApi for UtilityEngine {
    fn match_utilities(&mut self, generators: Generators, values: ValuesTable) -> Result<()> {
        if let Some(prefix) = generators.keys().find(|p| self.families.contains_key(*p)) {
            return Err(Error::DuplicateFamily {
                prefix: prefix.clone(),
            });
        }

        for (prefix, generator) in generators {
            self.families.insert(
                prefix,
                Family {
                    generator,
                    values: values.clone(),
                },
            );
        }
        Ok(())
    }

    fn theme(&self) -> ThemeHandle {
        self.theme.clone()
    }
}
