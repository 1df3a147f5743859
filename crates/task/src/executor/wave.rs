use super::{task::run_scheduled_task, RunReport, TaskExecutor, TaskStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;
use wrkit_core::{Error, Result, TaskDefinition};

impl TaskExecutor {
    /// Run one wave.
    ///
    /// Members are walked in order. Consecutive parallel tasks form a batch;
    /// a non-parallel task is a barrier that first runs and awaits the pending
    /// batch, then runs alone. Returns whether every member succeeded.
    pub(crate) async fn run_wave(&self, wave: &[String], report: &mut RunReport) -> bool {
        let mut pending: Vec<&TaskDefinition> = Vec::new();

        for name in wave {
            let Some(task) = self.graph.get(name) else {
                report.record_fatal(Error::task_not_found(name));
                return false;
            };

            if task.parallel {
                pending.push(task);
                continue;
            }

            if !self.run_batch(std::mem::take(&mut pending), report).await {
                return false;
            }

            let span = tracing::info_span!("task", name = %task.name);
            let outcome = run_scheduled_task(&self.state, task).instrument(span).await;
            if let Err(e) = &outcome {
                tracing::error!(task = %task.name, error = %e, "task failed");
            }
            if !report.record_task(&task.name, outcome) {
                return false;
            }
        }

        self.run_batch(pending, report).await
    }

    /// Run a batch of parallel tasks concurrently and wait for all of them.
    ///
    /// Members are never cancelled because a sibling failed; every outcome is
    /// recorded in walk order. Members inherit the process stdout and stderr,
    /// so output of concurrent members interleaves in no defined order.
    async fn run_batch(&self, batch: Vec<&TaskDefinition>, report: &mut RunReport) -> bool {
        if batch.is_empty() {
            return true;
        }
        tracing::debug!(tasks = batch.len(), "starting parallel batch");

        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Result<TaskStatus>)>();
        let mut join_set = JoinSet::new();

        for (position, task) in batch.iter().enumerate() {
            let task = (*task).clone();
            let state = Arc::clone(&self.state);
            let limiter = self.limiter.clone();
            let tx = tx.clone();
            let span = tracing::info_span!("task", name = %task.name);

            join_set.spawn(
                async move {
                    let outcome = match limiter {
                        Some(limiter) => match limiter.acquire_owned().await {
                            Ok(_permit) => run_scheduled_task(&state, &task).await,
                            Err(_) => Err(Error::Cancelled),
                        },
                        None => run_scheduled_task(&state, &task).await,
                    };
                    if let Err(e) = &outcome {
                        tracing::error!(task = %task.name, error = %e, "task failed");
                    }
                    // The receiver outlives every sender in this batch
                    let _ = tx.send((position, outcome));
                }
                .instrument(span),
            );
        }
        drop(tx);

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "parallel task aborted");
            }
        }

        let mut outcomes: Vec<Option<Result<TaskStatus>>> = batch.iter().map(|_| None).collect();
        while let Some((position, outcome)) = rx.recv().await {
            outcomes[position] = Some(outcome);
        }

        let mut all_succeeded = true;
        for (task, outcome) in batch.iter().zip(outcomes) {
            // A missing outcome means the task panicked before reporting
            let outcome = outcome.unwrap_or_else(|| {
                Err(Error::configuration(format!(
                    "task '{}' stopped without reporting a result",
                    task.name
                )))
            });
            all_succeeded &= report.record_task(&task.name, outcome);
        }
        all_succeeded
    }
}
