use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable configuration of one run, passed by parameter through the scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report tasks as would-run without invoking any command
    pub dry_run: bool,
    /// Print `[start]`/`[done]`/`[cmd]` progress lines
    pub verbose: bool,
    /// Caller-supplied variables, highest template precedence
    pub variables: BTreeMap<String, String>,
    /// Cap on tasks running at once inside a parallel batch, 0 for no cap
    pub max_parallel: usize,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel;
        self
    }
}

/// Cancellation context shared by everything a run starts.
///
/// Clones observe the same state. Once cancelled it stays cancelled, so a
/// context serves a single run.
#[derive(Debug, Clone)]
pub struct RunContext {
    sender: Arc<watch::Sender<bool>>,
}

impl RunContext {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Cancel the run. Commands still in flight are killed.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the run is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only fails on teardown
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }

    /// Guard that cancels this context when dropped
    pub(crate) fn teardown_guard(&self) -> TeardownGuard {
        TeardownGuard(self.clone())
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels the run context when the run ends, however it ends
pub(crate) struct TeardownGuard(RunContext);

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
