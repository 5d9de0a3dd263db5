//! Generation results and the policy applied to per-utility failures.

use serde::Deserialize;

use crate::utility::UtilityRule;
use crate::{Error, Result};

/// What a build does when some utilities fail to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the build if any utility failed.
    #[default]
    Fail,
    /// Log failures and emit the utilities that succeeded.
    Warn,
}

/// A utility whose generator returned an error.
#[derive(Debug)]
pub struct GenerationFailure {
    /// The utility as written in markup.
    pub utility: String,
    /// Why it failed.
    pub error: Error,
}

/// Everything one generation pass produced.
#[derive(Debug, Default)]
pub struct GeneratedCss {
    /// Successfully generated rules, in utility name order.
    pub rules: Vec<UtilityRule>,
    /// Failed utilities, in utility name order.
    pub failures: Vec<GenerationFailure>,
}

impl GeneratedCss {
    /// Serialize all rules, separated by blank lines.
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(|rule| rule.to_css())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Find the rule of a utility.
    pub fn rule(&self, utility: &str) -> Option<&UtilityRule> {
        self.rules.iter().find(|rule| rule.class == utility)
    }

    /// Whether every requested utility generated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Apply `policy` to the collected failures.
    ///
    /// Under [`ErrorPolicy::Warn`] each failure is logged and kept in
    /// `failures`; under [`ErrorPolicy::Fail`] the first one becomes the
    /// error.
    pub fn into_result(mut self, policy: ErrorPolicy) -> Result<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }

        match policy {
            ErrorPolicy::Warn => {
                for failure in &self.failures {
                    tracing::warn!("Skipping {}: {}", failure.utility, failure.error);
                }
                Ok(self)
            }
            ErrorPolicy::Fail => {
                let count = self.failures.len();
                let first = self.failures.remove(0);
                tracing::error!("{} utilities failed, first: {}", count, first.utility);
                Err(Error::Generation {
                    count,
                    first: Box::new(first.error),
                })
            }
        }
    }
}
