//! Icon utility declarations and the plugin that registers them.

mod declaration;
mod synthesizer;

pub use declaration::{UtilityDeclaration, UtilityRule, escape_identifier};
pub use synthesizer::{
    DEFAULT_PREFIX, DEFAULT_SIZE_KEY, IconOptions, IconUtilities, icon_declaration,
    register_icon_utilities, synthesize,
};
