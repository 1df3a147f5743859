//! Task-related types for the scheduling pipeline

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;

/// Condition under which a post-hook fires
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookTrigger {
    /// Root task finished without error
    Success,
    /// Root task errored
    Fail,
    /// Fires regardless of the root outcome
    Always,
    /// Trigger string that is not recognized; the hook is skipped
    Unknown(String),
}

impl HookTrigger {
    /// Normalize a raw trigger string.
    ///
    /// `""` and `"success"` mean success, `"always"` means always and
    /// `"fail"`, `"failed"`, `"fails"` mean fail. Matching is exact, any other
    /// spelling is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "success" => HookTrigger::Success,
            "always" => HookTrigger::Always,
            "fail" | "failed" | "fails" => HookTrigger::Fail,
            _ => HookTrigger::Unknown(raw.to_string()),
        }
    }

    /// Whether the hook should run given the root task's outcome.
    /// Unknown triggers never run.
    pub fn fires_on(&self, root_succeeded: bool) -> bool {
        match self {
            HookTrigger::Success => root_succeeded,
            HookTrigger::Fail => !root_succeeded,
            HookTrigger::Always => true,
            HookTrigger::Unknown(_) => false,
        }
    }
}

impl fmt::Display for HookTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookTrigger::Success => f.write_str("success"),
            HookTrigger::Fail => f.write_str("fail"),
            HookTrigger::Always => f.write_str("always"),
            HookTrigger::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Follow-up task declared on a task, run after it finishes as the root of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostHook {
    /// Name of the task whose commands the hook runs
    pub task: String,
    /// Trigger string as written in the document
    pub when: String,
}

impl PostHook {
    pub fn new(task: impl Into<String>, when: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            when: when.into(),
        }
    }

    /// Normalized trigger of this hook
    pub fn trigger(&self) -> HookTrigger {
        HookTrigger::parse(&self.when)
    }
}

/// Immutable, validated task definition ready for scheduling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDefinition {
    /// Task name (unique key)
    pub name: String,
    /// Task description
    pub description: Option<String>,
    /// Command templates, executed in order through `sh -c`
    pub commands: Vec<String>,
    /// Names of the tasks that must complete first, in declared order
    pub dependencies: Vec<String>,
    /// Working directory; the current process directory when unset
    pub working_dir: Option<PathBuf>,
    /// Environment overrides layered on top of the process environment
    pub env: BTreeMap<String, String>,
    /// Whether the task may run concurrently with other parallel tasks of its wave
    pub parallel: bool,
    /// Post-hooks, evaluated in declared order
    pub post_hooks: Vec<PostHook>,
}

impl TaskDefinition {
    /// Create a new task definition with no commands or dependencies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_post_hook(mut self, task: impl Into<String>, when: impl Into<String>) -> Self {
        self.post_hooks.push(PostHook::new(task, when));
        self
    }
}

/// Everything the scheduling core consumes from the configuration layer
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    /// Variables declared in the document (lowest template precedence)
    pub variables: BTreeMap<String, String>,
    /// Task definitions keyed by name
    pub tasks: HashMap<String, TaskDefinition>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, keyed by its name
    pub fn insert(&mut self, task: TaskDefinition) {
        self.tasks.insert(task.name.clone(), task);
    }

    pub fn with_task(mut self, task: TaskDefinition) -> Self {
        self.insert(task);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_normalization() {
        assert_eq!(HookTrigger::parse(""), HookTrigger::Success);
        assert_eq!(HookTrigger::parse("success"), HookTrigger::Success);
        assert_eq!(HookTrigger::parse("always"), HookTrigger::Always);
        assert_eq!(HookTrigger::parse("fail"), HookTrigger::Fail);
        assert_eq!(HookTrigger::parse("failed"), HookTrigger::Fail);
        assert_eq!(HookTrigger::parse("fails"), HookTrigger::Fail);
        assert_eq!(
            HookTrigger::parse("sometimes"),
            HookTrigger::Unknown("sometimes".to_string())
        );
    }

    #[test]
    fn test_trigger_matching_is_exact() {
        for raw in ["Success", "ALWAYS", " fail ", " Failed ", "success "] {
            assert_eq!(HookTrigger::parse(raw), HookTrigger::Unknown(raw.to_string()));
            assert!(!HookTrigger::parse(raw).fires_on(true));
            assert!(!HookTrigger::parse(raw).fires_on(false));
        }
    }

    #[test]
    fn test_trigger_eligibility() {
        assert!(HookTrigger::Success.fires_on(true));
        assert!(!HookTrigger::Success.fires_on(false));
        assert!(HookTrigger::Fail.fires_on(false));
        assert!(!HookTrigger::Fail.fires_on(true));
        assert!(HookTrigger::Always.fires_on(true));
        assert!(HookTrigger::Always.fires_on(false));
        assert!(!HookTrigger::Unknown("x".into()).fires_on(true));
        assert!(!HookTrigger::Unknown("x".into()).fires_on(false));
    }

    #[test]
    fn test_builder_keeps_declared_order() {
        let task = TaskDefinition::new("deploy")
            .with_dependency("build")
            .with_dependency("test")
            .with_command("echo one")
            .with_command("echo two")
            .with_post_hook("notify", "always");

        assert_eq!(task.dependencies, vec!["build", "test"]);
        assert_eq!(task.commands, vec!["echo one", "echo two"]);
        assert_eq!(task.post_hooks[0].trigger(), HookTrigger::Always);
        assert!(!task.parallel);
    }

    #[test]
    fn test_task_set_keys_by_name() {
        let set = TaskSet::new()
            .with_task(TaskDefinition::new("a"))
            .with_variable("NAME", "value");
        assert!(set.get("a").is_some());
        assert!(set.get("b").is_none());
        assert_eq!(set.variables["NAME"], "value");
    }
}
