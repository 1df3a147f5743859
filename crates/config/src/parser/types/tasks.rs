//! Task configuration types

use super::HookConfig;
use serde::{de::SeqAccess, de::Visitor, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use wrkit_core::TaskDefinition;

/// A task as written in the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub cmds: Commands,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<HookConfig>,
}

impl TaskConfig {
    /// Convert into the definition the scheduler consumes
    pub fn into_definition(self, name: impl Into<String>) -> TaskDefinition {
        let description = self.desc.filter(|d| !d.trim().is_empty());

        TaskDefinition {
            name: name.into(),
            description,
            commands: self.cmds.0,
            dependencies: self.deps,
            working_dir: self
                .dir
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            env: self.env,
            parallel: self.parallel,
            post_hooks: self.post.into_iter().map(HookConfig::into_post_hook).collect(),
        }
    }
}

/// Command lines of a task.
///
/// Accepts either a YAML sequence or a block scalar with one command per line.
/// Every line has `\r` removed and is trimmed; blank lines are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Commands(pub Vec<String>);

impl Commands {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn push_lines(&mut self, text: &str) {
        self.0.extend(
            text.lines()
                .map(|line| line.replace('\r', "").trim().to_string())
                .filter(|line| !line.is_empty()),
        );
    }
}

impl<'de> Deserialize<'de> for Commands {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CommandsVisitor;

        impl<'de> Visitor<'de> for CommandsVisitor {
            type Value = Commands;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list of commands or a block of command lines")
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Commands::default())
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Commands::default())
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                let mut commands = Commands::default();
                commands.push_lines(value);
                Ok(commands)
            }

            fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
            where
                S: SeqAccess<'de>,
            {
                let mut commands = Commands::default();
                while let Some(line) = seq.next_element::<String>()? {
                    commands.push_lines(&line);
                }
                Ok(commands)
            }
        }

        deserializer.deserialize_any(CommandsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_scalar_commands() {
        let task: TaskConfig =
            serde_yaml::from_str("cmds: |\n  sleep 2\r\n\n    echo done  \n").unwrap();
        assert_eq!(task.cmds.as_slice(), ["sleep 2", "echo done"]);
    }

    #[test]
    fn test_sequence_commands() {
        let task: TaskConfig = serde_yaml::from_str("cmds: [' echo a ', '', 'echo b']").unwrap();
        assert_eq!(task.cmds.as_slice(), ["echo a", "echo b"]);
    }

    #[test]
    fn test_missing_commands() {
        let task: TaskConfig = serde_yaml::from_str("desc: nothing to do").unwrap();
        assert!(task.cmds.as_slice().is_empty());

        let task: TaskConfig = serde_yaml::from_str("cmds:").unwrap();
        assert!(task.cmds.as_slice().is_empty());
    }

    #[test]
    fn test_into_definition() {
        let yaml = r#"
desc: "deploy it"
cmds: ["echo {{.MSG}}"]
deps: [build, test]
dir: ./out
env: { MODE: prod }
parallel: true
post:
  - task: notify
    when: always
"#;
        let task: TaskConfig = serde_yaml::from_str(yaml).unwrap();
        let def = task.into_definition("deploy");

        assert_eq!(def.name, "deploy");
        assert_eq!(def.description.as_deref(), Some("deploy it"));
        assert_eq!(def.dependencies, vec!["build", "test"]);
        assert_eq!(def.working_dir, Some(PathBuf::from("./out")));
        assert_eq!(def.env["MODE"], "prod");
        assert!(def.parallel);
        assert_eq!(def.post_hooks[0].task, "notify");
        assert_eq!(def.post_hooks[0].when, "always");
    }

    #[test]
    fn test_empty_dir_is_unset() {
        let task: TaskConfig = serde_yaml::from_str("dir: ''").unwrap();
        assert!(task.into_definition("t").working_dir.is_none());
    }
}
