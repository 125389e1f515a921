//! Error types for navigation dispatch.

use thiserror::Error;

/// Errors raised while dispatching a navigation.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A request URL or rewrite target could not be parsed.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
        /// Parser failure.
        source: url::ParseError,
    },

    /// A middleware matcher pattern did not compile.
    #[error("invalid matcher pattern: {0}")]
    InvalidMatcher(#[from] regex::Error),

    /// A page module could not be loaded.
    #[error("failed to load module '{source_path}': {message}")]
    ModuleLoad {
        /// Virtual file path of the module.
        source_path: String,
        /// Loader message.
        message: String,
    },

    /// A middleware handler failed.
    #[error("middleware failed: {0}")]
    Middleware(String),

    /// Navigation data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, RouterError>;
