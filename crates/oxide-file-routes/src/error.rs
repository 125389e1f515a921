//! Build-time errors of the route compiler.

use thiserror::Error;

/// Errors that abort route compilation.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A file path does not live under the configured app directory.
    #[error("'{path}' is not under './{root_dir}/'")]
    OutsideRoot {
        /// The offending file path.
        path: String,
        /// The expected root directory.
        root_dir: String,
    },

    /// A file path has no file name.
    #[error("'{0}' does not name a file")]
    MissingFileName(String),

    /// Two nodes with different paths were merged.
    #[error("paths do not match: '{target}' and '{source_path}'")]
    PathMismatch {
        /// Path of the accumulated node.
        target: String,
        /// Path of the incoming node.
        source_path: String,
    },

    /// A decorator file points below a node that has no children.
    #[error("route '{parent}' has no children, but expected to find '{segment}'")]
    NoChildren {
        /// Path of the node that was reached.
        parent: String,
        /// The segment that was looked for.
        segment: String,
    },

    /// A decorator file points at a segment no page declared.
    #[error("segment '{segment}' does not exist among the children of route '{parent}'")]
    MissingSegment {
        /// Path of the node that was searched.
        parent: String,
        /// The segment that was looked for.
        segment: String,
    },

    /// Two page files map to the same route.
    #[error("route '{0}' already has an index page")]
    DuplicateIndex(String),

    /// Two layout files map to the same route.
    #[error("route '{0}' already has a layout")]
    DuplicateLayout(String),

    /// Two error files map to the same route.
    #[error("route '{0}' already has an error view")]
    DuplicateErrorView(String),

    /// Compiler options could not be parsed.
    #[error("invalid compiler options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Result type for route compilation.
pub type Result<T> = std::result::Result<T, RouteError>;
