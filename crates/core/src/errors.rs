use std::path::PathBuf;

/// Result type alias for wrkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for wrkit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task lists a dependency that is not defined
    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    /// The dependency graph contains a cycle
    #[error("cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// The requested task is not defined
    #[error("task '{task}' not found")]
    TaskNotFound { task: String },

    /// A command template could not be rendered
    #[error("failed to render template '{template}': {message}")]
    TemplateRender { template: String, message: String },

    /// A rendered command failed to run or exited unsuccessfully
    #[error("{}", format_command_error(.command, .message, .exit_code))]
    CommandExecution {
        command: String,
        message: String,
        exit_code: Option<i32>,
    },

    /// A task failed while the run was in progress
    #[error("task '{task}' failed")]
    TaskFailed {
        task: String,
        #[source]
        source: Box<Error>,
    },

    /// A post-hook of the root task failed
    #[error("post-hook '{target}' of task '{root}' failed")]
    PostHook {
        root: String,
        target: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// File system operations
    #[error("file system {operation} operation failed for '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML document errors
    #[error("failed to parse YAML document '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The run was cancelled before it completed
    #[error("execution cancelled")]
    Cancelled,
}

fn format_command_error(command: &str, message: &str, exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("command '{command}' failed with exit code {code}: {message}"),
        None => format!("command '{command}' failed: {message}"),
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an unknown dependency error
    #[must_use]
    pub fn unknown_dependency(task: impl Into<String>, dependency: impl Into<String>) -> Self {
        Error::UnknownDependency {
            task: task.into(),
            dependency: dependency.into(),
        }
    }

    /// Create a task not found error
    #[must_use]
    pub fn task_not_found(task: impl Into<String>) -> Self {
        Error::TaskNotFound { task: task.into() }
    }

    /// Create a template rendering error
    #[must_use]
    pub fn template_render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TemplateRender {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            message: message.into(),
            exit_code,
        }
    }

    /// Wrap the cause of a task failure
    #[must_use]
    pub fn task_failed(task: impl Into<String>, source: Error) -> Self {
        Error::TaskFailed {
            task: task.into(),
            source: Box::new(source),
        }
    }

    /// Wrap the cause of a post-hook failure
    #[must_use]
    pub fn post_hook(root: impl Into<String>, target: impl Into<String>, source: Error) -> Self {
        Error::PostHook {
            root: root.into(),
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a YAML error for a document
    #[must_use]
    pub fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Error::Yaml {
            path: path.into(),
            source,
        }
    }

    /// Name of the task a run-level failure points at, if any
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            Error::TaskFailed { task, .. } => Some(task.as_str()),
            _ => None,
        }
    }
}

/// A failure tagged by whether it stops the run.
///
/// Task failures are fatal. Post-hook problems (unknown trigger, missing target,
/// failed hook command) are recorded as non-fatal and never change the result.
#[derive(Debug)]
pub enum Failure {
    Fatal(Error),
    NonFatal(Error),
}

impl Failure {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Failure::Fatal(_))
    }

    pub fn error(&self) -> &Error {
        match self {
            Failure::Fatal(e) | Failure::NonFatal(e) => e,
        }
    }

    pub fn into_error(self) -> Error {
        match self {
            Failure::Fatal(e) | Failure::NonFatal(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cycle_message_joins_path() {
        let err = Error::CycleDetected {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cycle detected: a -> b -> a");
    }

    #[test]
    fn test_task_failed_wraps_cause() {
        let cause = Error::command_execution("exit 3", "non-zero exit status", Some(3));
        let err = Error::task_failed("build", cause);

        assert_eq!(err.to_string(), "task 'build' failed");
        assert_eq!(err.failed_task(), Some("build"));
        let source = err.source().expect("task failure keeps its cause");
        assert!(source.to_string().contains("exit code 3"));
    }

    #[test]
    fn test_command_error_without_exit_code() {
        let err = Error::command_execution("missing-binary", "spawn failed", None);
        assert_eq!(err.to_string(), "command 'missing-binary' failed: spawn failed");
    }

    #[test]
    fn test_failure_severity() {
        let fatal = Failure::Fatal(Error::task_not_found("x"));
        let non_fatal = Failure::NonFatal(Error::configuration("hook"));
        assert!(fatal.is_fatal());
        assert!(!non_fatal.is_fatal());
        assert!(matches!(fatal.error(), Error::TaskNotFound { .. }));
    }
}
