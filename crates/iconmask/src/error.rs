//! Error types for catalog loading and utility generation.

use std::path::PathBuf;

/// Result type alias for iconmask operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building icon utilities.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The icon directory is missing or cannot be listed.
    ///
    /// Fatal for the whole build: no utility of the set can exist.
    #[error("Icon directory '{path}' is unavailable: {source}")]
    CatalogSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cataloged icon file could not be read at generation time.
    #[error("Failed to read icon '{name}' from '{path}': {source}")]
    AssetRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Icon markup that cannot be embedded in a data URI.
    #[error("Icon '{name}' cannot be embedded: {message}")]
    MalformedMarkup { name: String, message: String },

    /// The theme has no value for a dotted key.
    #[error("Theme key '{key}' is not defined")]
    UnknownThemeKey { key: String },

    /// A theme value that is not a CSS length.
    #[error("Theme value '{value}' for '{key}' is not a length: {message}")]
    InvalidLength {
        key: String,
        value: String,
        message: String,
    },

    /// Two plugins registered the same utility family.
    #[error("Utility family '{prefix}' is already registered")]
    DuplicateFamily { prefix: String },

    /// Invalid or unreadable build configuration.
    #[error("Invalid configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// Generic file I/O error.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more utilities failed to generate under a failing error policy.
    #[error("{count} icon utilities failed to generate (first: {first})")]
    Generation { count: usize, first: Box<Error> },

    /// Hot-reload error.
    #[cfg(feature = "hot-reload")]
    #[error("Hot-reload error: {0}")]
    HotReload(String),
}

impl Error {
    /// Create a catalog source error.
    pub fn catalog_source(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CatalogSourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an asset read error.
    pub fn asset_read(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::AssetRead {
            name: name.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a malformed markup error.
    pub fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedMarkup {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid length error.
    pub fn invalid_length(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidLength {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error invalidates the whole build rather than one utility.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CatalogSourceUnavailable { .. }
                | Self::DuplicateFamily { .. }
                | Self::Config { .. }
                | Self::Generation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_read_message_names_icon_and_path() {
        let err = Error::asset_read(
            "home",
            "/icons/home.svg",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        let message = err.to_string();
        assert!(message.contains("'home'"));
        assert!(message.contains("/icons/home.svg"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn catalog_source_is_fatal() {
        let err = Error::catalog_source(
            "/missing",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_fatal());
    }
}
