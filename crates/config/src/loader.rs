//! Configuration loader for wrkit
//!
//! Reads the global master document and the local document, either of which
//! may be absent, and layers them into a single [`Config`].

use crate::config::Config;
use crate::parser::{parse_document, ConfigFile};
use std::path::{Path, PathBuf};
use wrkit_core::{
    constants::{DEFAULT_CONFIG_FILENAME, MASTER_CONFIG_FILENAME},
    Error, Result,
};

/// Loader that resolves which documents to read and merges them
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Local document, `wrkit.yaml` in the current directory by default
    file: PathBuf,
    /// Master document, `~/.wrkit.master.yaml` by default
    master: Option<PathBuf>,
    /// Skip the master document entirely
    no_master: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with the default document locations
    pub fn new() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CONFIG_FILENAME),
            master: default_master_path(),
            no_master: false,
        }
    }

    /// Set the local document path
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = path.into();
        self
    }

    /// Set the master document path
    pub fn master(mut self, path: impl Into<PathBuf>) -> Self {
        self.master = Some(path.into());
        self
    }

    /// Ignore the master document
    pub fn no_master(mut self, no_master: bool) -> Self {
        self.no_master = no_master;
        self
    }

    /// Local document path this loader reads
    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// Load and merge the documents
    pub fn load(self) -> Result<Config> {
        let master = match (&self.master, self.no_master) {
            (Some(path), false) => read_document(path)?.map(|doc| (doc, path.clone())),
            _ => None,
        };
        let local = read_document(&self.file)?.map(|doc| (doc, self.file.clone()));

        let config = match (master, local) {
            (None, None) => {
                tracing::debug!(file = %self.file.display(), "no configuration documents found");
                Config::empty()
            }
            (Some((doc, path)), None) | (None, Some((doc, path))) => Config::from_file(doc, path),
            (Some((master, master_path)), Some((local, local_path))) => {
                Config::from_file(master, master_path).merge(local, local_path)
            }
        };

        tracing::debug!(
            sources = ?config.sources(),
            tasks = config.tasks().len(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// `~/.wrkit.master.yaml`, or `None` when the home directory is unknown
pub fn default_master_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(MASTER_CONFIG_FILENAME))
}

/// Read one document. A missing file yields `Ok(None)`.
fn read_document(path: &Path) -> Result<Option<ConfigFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::file_system(path, "read", e)),
    };
    parse_document(&content, path).map(Some)
}
