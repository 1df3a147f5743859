use super::{RunState, TaskStatus};
use crate::command_executor::ShellCommand;
use wrkit_core::{render, Error, Result, TaskDefinition};

/// Run one scheduled task, printing its progress lines
pub(crate) async fn run_scheduled_task(state: &RunState, task: &TaskDefinition) -> Result<TaskStatus> {
    if state.options.dry_run {
        println!("[dry-run] task {}", task.name);
        return Ok(TaskStatus::DryRun);
    }

    if state.options.verbose {
        println!("[start] task {}", task.name);
    } else {
        println!("→ {}", task.name);
    }

    run_commands(state, task).await?;

    if state.options.verbose {
        println!("[done]  task {}", task.name);
    }
    Ok(TaskStatus::Succeeded)
}

/// Render and execute a task's commands one at a time, in declared order.
///
/// The first failing command stops the task; earlier commands are not undone.
pub(crate) async fn run_commands(state: &RunState, task: &TaskDefinition) -> Result<()> {
    for template in &task.commands {
        if state.context.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let command = render(template, &state.variables)?;
        if state.options.verbose {
            println!("[cmd] {command}");
        }
        tracing::debug!(task = %task.name, command = %command, "running command");

        let shell = ShellCommand {
            command,
            working_dir: task.working_dir.clone(),
            env: task.env.clone(),
        };
        state.command_executor.execute(&shell, &state.context).await?;
    }
    Ok(())
}
