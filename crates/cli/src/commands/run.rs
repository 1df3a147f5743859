use crate::cli::GlobalArgs;
use wrkit_task::{RunContext, TaskExecutor};

/// Load the configuration and run `task`. Ctrl-C cancels the run.
pub async fn execute(global: &GlobalArgs, task: &str) -> eyre::Result<()> {
    let task_set = global.loader().load()?.into_task_set();
    let context = RunContext::new();
    let executor = TaskExecutor::new(&task_set, global.run_options())?.with_context(context.clone());

    let run = executor.execute(task);
    tokio::pin!(run);

    let report = tokio::select! {
        report = &mut run => report?,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, cancelling run");
            context.cancel();
            run.await?
        }
    };

    for warning in report.warnings() {
        tracing::debug!(error = %warning, "post-hook problem");
    }
    report.into_result()?;
    Ok(())
}
