use crate::executor::RunContext;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use wrkit_core::{constants::DEFAULT_SHELL, Error, Result};

/// One rendered command line ready to be handed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Rendered command line, passed to `sh -c` untouched
    pub command: String,
    /// Directory to run in; the process's current directory when unset
    pub working_dir: Option<PathBuf>,
    /// Variables layered on top of the inherited process environment
    pub env: BTreeMap<String, String>,
}

/// Trait for executing a single shell command.
///
/// The scheduler calls this once per rendered command line. Implementations
/// must stop early and return `Error::Cancelled` when the run is cancelled.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &ShellCommand, context: &RunContext) -> Result<()>;
}

/// Production implementation running commands through a POSIX shell
#[derive(Debug, Clone)]
pub struct SystemCommandExecutor {
    shell: String,
}

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Use a different shell binary. It must accept `-c <command>`.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for SystemCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(&self, command: &ShellCommand, context: &RunContext) -> Result<()> {
        if context.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut cmd = tokio::process::Command::new(&self.shell);
        cmd.arg("-c")
            .arg(&command.command)
            .envs(&command.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            Error::command_execution(&command.command, format!("failed to spawn: {e}"), None)
        })?;

        let status = tokio::select! {
            status = child.wait() => Some(status),
            () = context.cancelled() => None,
        };

        let Some(status) = status else {
            tracing::debug!(command = %command.command, "killing command after cancellation");
            if let Err(e) = child.kill().await {
                tracing::warn!(command = %command.command, error = %e, "failed to kill command");
            }
            return Err(Error::Cancelled);
        };

        let status = status.map_err(|e| {
            Error::command_execution(&command.command, format!("failed to wait: {e}"), None)
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::command_execution(
                &command.command,
                format!("exited with {status}"),
                status.code(),
            ))
        }
    }
}

/// Test implementation that records commands instead of running them
#[cfg(test)]
#[derive(Default)]
pub struct RecordingCommandExecutor {
    events: std::sync::Mutex<Vec<String>>,
    failing: std::collections::HashSet<String>,
    delays: std::collections::HashMap<String, std::time::Duration>,
}

#[cfg(test)]
impl RecordingCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an exact command line exit with status 1
    pub fn fail_on(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }

    /// Make an exact command line take some time
    pub fn delay(mut self, command: &str, millis: u64) -> Self {
        self.delays
            .insert(command.to_string(), std::time::Duration::from_millis(millis));
        self
    }

    fn push(&self, event: String) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// `start:<cmd>` / `end:<cmd>` events in the order they happened
    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Commands that were started, in start order
    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix("start:").map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for RecordingCommandExecutor {
    async fn execute(&self, command: &ShellCommand, _context: &RunContext) -> Result<()> {
        self.push(format!("start:{}", command.command));
        if let Some(delay) = self.delays.get(&command.command) {
            tokio::time::sleep(*delay).await;
        }
        self.push(format!("end:{}", command.command));

        if self.failing.contains(&command.command) {
            Err(Error::command_execution(
                &command.command,
                "exited with exit status: 1",
                Some(1),
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shell(command: &str) -> ShellCommand {
        ShellCommand {
            command: command.to_string(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_successful_command() {
        let executor = SystemCommandExecutor::new();
        let result = executor.execute(&shell("true"), &RunContext::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let executor = SystemCommandExecutor::new();
        let err = executor
            .execute(&shell("exit 3"), &RunContext::new())
            .await
            .unwrap_err();
        match err {
            Error::CommandExecution {
                command, exit_code, ..
            } => {
                assert_eq!(command, "exit 3");
                assert_eq!(exit_code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_working_dir_and_env() {
        let dir = TempDir::new().unwrap();
        let mut command = shell("printf '%s' \"$GREETING\" > out.txt");
        command.working_dir = Some(dir.path().to_path_buf());
        command.env.insert("GREETING".into(), "hi there".into());

        SystemCommandExecutor::new()
            .execute(&command, &RunContext::new())
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(written, "hi there");
    }

    #[tokio::test]
    async fn test_missing_shell_fails_to_spawn() {
        let executor = SystemCommandExecutor::with_shell("/nonexistent/shell");
        let err = executor
            .execute(&shell("true"), &RunContext::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[tokio::test]
    async fn test_cancellation_kills_command() {
        let context = RunContext::new();
        let canceller = context.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let started = std::time::Instant::now();
        let err = SystemCommandExecutor::new()
            .execute(&shell("sleep 10"), &context)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }
}
