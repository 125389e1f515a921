//! Naming conventions understood by the compiler.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The file-system conventions the segmenter and compiler follow.
///
/// `Default` gives the conventional layout: pages under `./app`, route
/// groups in parentheses, `(index)` folders that vanish, `_private`
/// folders that are ignored, and `edit`/`update` sub-pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Directory holding the routes, directly below the virtual root `.`.
    pub root_dir: String,
    /// Folder name that is dropped from the route path entirely.
    pub index_group: String,
    /// Folders starting with this prefix never become route segments.
    pub private_prefix: String,
    /// File stem declaring a page.
    pub page_stem: String,
    /// File stem declaring a layout.
    pub layout_stem: String,
    /// File stem declaring a loading view.
    pub loading_stem: String,
    /// File stem declaring an error boundary.
    pub error_stem: String,
    /// File stem declaring a not-found view.
    pub not_found_stem: String,
    /// Segment names treated as edit sub-pages.
    pub edit_segments: Vec<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            root_dir: "app".to_string(),
            index_group: "(index)".to_string(),
            private_prefix: "_".to_string(),
            page_stem: "page".to_string(),
            layout_stem: "layout".to_string(),
            loading_stem: "loading".to_string(),
            error_stem: "error".to_string(),
            not_found_stem: "404".to_string(),
            edit_segments: vec!["edit".to_string(), "update".to_string()],
        }
    }
}

impl CompilerOptions {
    /// Parses options from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns whether `segment` names an edit sub-page.
    pub fn is_edit_segment(&self, segment: &str) -> bool {
        self.edit_segments.iter().any(|s| s == segment)
    }
}
