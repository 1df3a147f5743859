mod context;
mod report;
mod task;
mod wave;

pub use context::{RunContext, RunOptions};
pub use report::{HookResult, HookStatus, RunReport, TaskResult, TaskStatus};
pub(crate) use task::run_commands;

use crate::command_executor::{CommandExecutor, SystemCommandExecutor};
use crate::graph::TaskGraph;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::Instrument;
use wrkit_core::{Error, Result, TaskSet, Variables};

/// Read-only state shared by every task of a run
#[derive(Clone)]
pub(crate) struct RunState {
    pub(crate) variables: Variables,
    pub(crate) options: RunOptions,
    pub(crate) command_executor: Arc<dyn CommandExecutor>,
    pub(crate) context: RunContext,
}

/// Runs a requested task and its dependency closure wave by wave
pub struct TaskExecutor {
    pub(crate) graph: TaskGraph,
    pub(crate) state: Arc<RunState>,
    /// Caps tasks running at once inside a parallel batch
    pub(crate) limiter: Option<Arc<Semaphore>>,
}

impl TaskExecutor {
    /// Validate the task set and prepare a run.
    ///
    /// Variables are merged once here from the document, the process
    /// environment and the caller overrides in `options`.
    pub fn new(source: &TaskSet, options: RunOptions) -> Result<Self> {
        let graph = TaskGraph::build(source.tasks.clone())?;
        let variables = Variables::from_process(
            source.variables.clone(),
            options.variables.clone(),
        );
        let limiter = (options.max_parallel > 0)
            .then(|| Arc::new(Semaphore::new(options.max_parallel)));

        Ok(Self {
            graph,
            state: Arc::new(RunState {
                variables,
                options,
                command_executor: Arc::new(SystemCommandExecutor::new()),
                context: RunContext::new(),
            }),
            limiter,
        })
    }

    /// Replace the command-execution capability
    pub fn with_command_executor(mut self, command_executor: Arc<dyn CommandExecutor>) -> Self {
        Arc::make_mut(&mut self.state).command_executor = command_executor;
        self
    }

    /// Use a caller-owned cancellation context, e.g. one wired to Ctrl-C
    pub fn with_context(mut self, context: RunContext) -> Self {
        Arc::make_mut(&mut self.state).context = context;
        self
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn variables(&self) -> &Variables {
        &self.state.variables
    }

    /// Run `root` and everything it depends on, then its post-hooks.
    ///
    /// Graph errors (unknown root) are returned directly. Task failures are
    /// recorded in the report; see [`RunReport::into_result`]. The run context
    /// is cancelled when the run ends.
    pub async fn execute(self, root: &str) -> Result<RunReport> {
        let waves = self.graph.waves(root)?;
        let _teardown = self.state.context.teardown_guard();

        let span = tracing::info_span!("run", root = %root, waves = waves.len());
        async {
            tracing::info!(total_tasks = waves.iter().map(Vec::len).sum::<usize>(), "starting run");
            let mut report = RunReport::new(root);

            for (index, wave) in waves.iter().enumerate() {
                if self.state.context.is_cancelled() {
                    report.record_fatal(Error::Cancelled);
                    break;
                }

                let span = tracing::info_span!("wave", idx = index, tasks = wave.len());
                tracing::info!(wave = index, tasks = ?wave, "starting wave");
                if !self.run_wave(wave, &mut report).instrument(span).await {
                    tracing::debug!(wave = index, "wave failed, no further waves start");
                    break;
                }
            }

            if report.attempted(root) {
                self.run_post_hooks(root, &mut report).await;
            } else {
                tracing::debug!("root task was not attempted, post-hooks skipped");
            }

            tracing::info!(success = report.is_success(), "run finished");
            Ok(report)
        }
        .instrument(span)
        .await
    }
}

/// Entry point: run `root` from `source` with the system shell.
///
/// Task failures are in the returned report; call
/// [`RunReport::into_result`] for the run-level result.
pub async fn run_task(source: &TaskSet, root: &str, options: RunOptions) -> Result<RunReport> {
    TaskExecutor::new(source, options)?.execute(root).await
}
