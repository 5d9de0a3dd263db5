//! Host plugin protocol.
//!
//! A [`Plugin`] is handed a [`PluginApi`] once per build. Through it the
//! plugin registers *matchable* utility families: one generator per family
//! prefix plus the values table of every name the family accepts. The host
//! later invokes a generator only for `<prefix>-<value>` utilities it
//! actually finds in consumer markup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Result;
use crate::catalog::{IconAsset, ValuesTable};
use crate::theme::ThemeHandle;
use crate::utility::UtilityDeclaration;

/// Produces the declaration block for one value of a utility family.
///
/// Generators must be independent between invocations; a host may call them
/// in any order, from any thread.
pub type Generator = Arc<dyn Fn(&IconAsset) -> Result<UtilityDeclaration> + Send + Sync>;

/// Generators keyed by utility family prefix.
pub type Generators = BTreeMap<String, Generator>;

/// The extension point a host exposes to plugins.
pub trait PluginApi {
    /// Register utility families with the names they accept.
    fn match_utilities(&mut self, generators: Generators, values: ValuesTable) -> Result<()>;

    /// Handle to the active theme for resolving scale keys.
    fn theme(&self) -> ThemeHandle;
}

/// A unit of utility registration.
pub trait Plugin {
    /// Name for diagnostics.
    fn name(&self) -> &str;

    /// Register this plugin's utilities.
    fn register(&self, api: &mut dyn PluginApi) -> Result<()>;
}
