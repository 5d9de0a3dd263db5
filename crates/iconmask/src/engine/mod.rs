//! Host side of the plugin protocol: family registry, candidate extraction
//! and rule generation.

mod candidates;
mod content;
mod output;
mod registry;

pub use candidates::{extend_candidates, extract_candidates};
pub use content::ContentSources;
pub use output::{ErrorPolicy, GeneratedCss, GenerationFailure};
pub use registry::UtilityEngine;
