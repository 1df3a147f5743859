//! Type definitions for task documents

mod example;
mod hooks;
mod tasks;

pub use example::EXAMPLE_DOCUMENT;
pub use hooks::HookConfig;
pub use tasks::{Commands, TaskConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One task document (`wrkit.yaml` or the master document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Template variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
    /// Task definitions keyed by name
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskConfig>,
}
