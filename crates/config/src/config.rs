//! Merged configuration
//!
//! The master document and the local document are layered key by key, the
//! local one winning, into a single immutable `Config`.

use crate::parser::{ConfigFile, TaskConfig};
use std::collections::BTreeMap;
use std::path::PathBuf;
use wrkit_core::TaskSet;

/// Configuration resolved from the master and local documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    vars: BTreeMap<String, String>,
    tasks: BTreeMap<String, TaskConfig>,
    /// Documents that contributed, lowest precedence first
    sources: Vec<PathBuf>,
}

impl Config {
    /// Empty configuration, used when no document exists
    pub fn empty() -> Self {
        Self::default()
    }

    /// Configuration backed by a single document
    pub fn from_file(file: ConfigFile, source: impl Into<PathBuf>) -> Self {
        Self {
            vars: file.vars,
            tasks: file.tasks,
            sources: vec![source.into()],
        }
    }

    /// Layer `overlay` on top of this configuration. Entries of `overlay` replace
    /// entries with the same key; tasks are replaced whole, not field by field.
    pub fn merge(mut self, overlay: ConfigFile, source: impl Into<PathBuf>) -> Self {
        self.vars.extend(overlay.vars);
        self.tasks.extend(overlay.tasks);
        self.sources.push(source.into());
        self
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskConfig> {
        &self.tasks
    }

    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.tasks.get(name)
    }

    /// Task names in sorted order
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.vars.is_empty()
    }

    /// Convert into the task set consumed by the scheduler
    pub fn into_task_set(self) -> TaskSet {
        let mut set = TaskSet::new();
        set.variables = self.vars;
        for (name, task) in self.tasks {
            set.insert(task.into_definition(name));
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;
    use std::path::Path;

    fn doc(yaml: &str) -> ConfigFile {
        parse_document(yaml, Path::new("test.yaml")).unwrap()
    }

    #[test]
    fn test_local_wins_key_by_key() {
        let master = doc(
            "vars: { A: master, B: master }\ntasks:\n  shared:\n    cmds: [echo master]\n  global:\n    cmds: [echo global]\n",
        );
        let local = doc("vars: { B: local }\ntasks:\n  shared:\n    cmds: [echo local]\n");

        let config = Config::from_file(master, "master.yaml").merge(local, "wrkit.yaml");

        assert_eq!(config.vars()["A"], "master");
        assert_eq!(config.vars()["B"], "local");
        assert_eq!(config.task("shared").unwrap().cmds.as_slice(), ["echo local"]);
        assert!(config.task("global").is_some());
        assert_eq!(config.sources().len(), 2);
    }

    #[test]
    fn test_into_task_set() {
        let config = Config::from_file(
            doc("vars: { X: '1' }\ntasks:\n  a:\n    deps: [b]\n  b: {}\n"),
            "wrkit.yaml",
        );
        let names: Vec<_> = config.task_names().collect();
        assert_eq!(names, vec!["a", "b"]);

        let set = config.into_task_set();
        assert_eq!(set.variables["X"], "1");
        assert_eq!(set.get("a").unwrap().dependencies, vec!["b"]);
        assert_eq!(set.get("b").unwrap().name, "b");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::empty();
        assert!(config.is_empty());
        assert!(config.into_task_set().tasks.is_empty());
    }
}
