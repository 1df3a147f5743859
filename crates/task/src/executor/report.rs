use std::fmt;
use wrkit_core::{Error, Failure, Result};

/// How a task finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    /// Skipped by dry-run; counts as success for scheduling
    DryRun,
    Failed(String),
}

impl TaskStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, TaskStatus::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub name: String,
    pub status: TaskStatus,
}

/// How a post-hook finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookStatus {
    Succeeded,
    DryRun,
    /// Not run: trigger did not match, trigger unknown or target missing
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResult {
    /// Target task of the hook
    pub hook: String,
    /// Trigger as written in the document
    pub when: String,
    pub status: HookStatus,
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStatus::Succeeded => f.write_str("succeeded"),
            HookStatus::DryRun => f.write_str("dry-run"),
            HookStatus::Skipped(reason) => write!(f, "skipped ({reason})"),
            HookStatus::Failed(message) => write!(f, "failed ({message})"),
        }
    }
}

/// Everything that happened during one run.
///
/// Only fatal failures decide the run result; hook problems are kept as
/// non-fatal failures next to them.
#[derive(Debug, Default)]
pub struct RunReport {
    pub root: String,
    /// Tasks in the order they finished being recorded
    pub tasks: Vec<TaskResult>,
    pub hooks: Vec<HookResult>,
    pub failures: Vec<Failure>,
}

impl RunReport {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Record a task outcome. Failures are wrapped so they name the task.
    pub(crate) fn record_task(&mut self, name: &str, outcome: Result<TaskStatus>) -> bool {
        let status = match outcome {
            Ok(status) => status,
            Err(cause) => {
                let status = TaskStatus::Failed(cause.to_string());
                self.failures
                    .push(Failure::Fatal(Error::task_failed(name, cause)));
                status
            }
        };
        let succeeded = status.is_success();
        self.tasks.push(TaskResult {
            name: name.to_string(),
            status,
        });
        succeeded
    }

    pub(crate) fn record_fatal(&mut self, error: Error) {
        self.failures.push(Failure::Fatal(error));
    }

    pub(crate) fn record_hook(&mut self, result: HookResult, failure: Option<Error>) {
        if let Some(error) = failure {
            self.failures.push(Failure::NonFatal(error));
        }
        self.hooks.push(result);
    }

    pub fn task(&self, name: &str) -> Option<&TaskResult> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Whether the task was attempted (ran, dry-ran or failed)
    pub fn attempted(&self, name: &str) -> bool {
        self.task(name).is_some()
    }

    pub fn is_success(&self) -> bool {
        !self.failures.iter().any(Failure::is_fatal)
    }

    /// First fatal failure, if any
    pub fn fatal(&self) -> Option<&Error> {
        self.failures
            .iter()
            .find(|f| f.is_fatal())
            .map(Failure::error)
    }

    /// Non-fatal failures, hook problems only
    pub fn warnings(&self) -> impl Iterator<Item = &Error> {
        self.failures
            .iter()
            .filter(|f| !f.is_fatal())
            .map(Failure::error)
    }

    /// The run result: the first fatal failure, or success
    pub fn into_result(self) -> Result<()> {
        match self.failures.into_iter().find(Failure::is_fatal) {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}
