//! YAML document parser
//!
//! Turns the text of a task document into its typed representation.

mod types;

pub use types::{Commands, ConfigFile, HookConfig, TaskConfig, EXAMPLE_DOCUMENT};

use std::path::Path;
use wrkit_core::{Error, Result};

/// Parse a document. `path` is only used for error reporting.
pub fn parse_document(content: &str, path: &Path) -> Result<ConfigFile> {
    // An empty file is a valid, empty document
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| Error::yaml(path, e))
}
