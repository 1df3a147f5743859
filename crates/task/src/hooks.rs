//! Post-hook dispatch
//!
//! After the root task has been attempted, its declared post-hooks are
//! evaluated in order against the root's own outcome. Hooks are best-effort:
//! whatever happens to them is recorded as non-fatal and never changes the
//! run result.

use crate::executor::{run_commands, HookResult, HookStatus, RunReport, TaskExecutor};
use tracing::Instrument;
use wrkit_core::{Error, HookTrigger, PostHook};

impl TaskExecutor {
    pub(crate) async fn run_post_hooks(&self, root: &str, report: &mut RunReport) {
        let Some(definition) = self.graph.get(root) else {
            return;
        };
        let root_succeeded = report
            .task(root)
            .is_some_and(|result| result.status.is_success());

        for hook in &definition.post_hooks {
            let span = tracing::info_span!("post_hook", root = %root, hook = %hook.task);
            let (status, failure) = self
                .dispatch_hook(root, hook, root_succeeded)
                .instrument(span)
                .await;

            report.record_hook(
                HookResult {
                    hook: hook.task.clone(),
                    when: hook.when.clone(),
                    status,
                },
                failure,
            );
        }
    }

    async fn dispatch_hook(
        &self,
        root: &str,
        hook: &PostHook,
        root_succeeded: bool,
    ) -> (HookStatus, Option<Error>) {
        let trigger = hook.trigger();
        if let HookTrigger::Unknown(raw) = &trigger {
            tracing::warn!(root = %root, hook = %hook.task, when = %raw, "unknown post-hook trigger, skipping");
            return (
                HookStatus::Skipped(format!("unknown trigger '{raw}'")),
                Some(Error::post_hook(
                    root,
                    &hook.task,
                    Error::configuration(format!("unknown trigger '{raw}'")),
                )),
            );
        }

        if !trigger.fires_on(root_succeeded) {
            tracing::debug!(hook = %hook.task, trigger = %trigger, "post-hook not triggered");
            return (
                HookStatus::Skipped(format!("trigger '{trigger}' did not match")),
                None,
            );
        }

        let Some(target) = self.graph.get(&hook.task) else {
            tracing::warn!(root = %root, hook = %hook.task, "post-hook target not found, skipping");
            return (
                HookStatus::Skipped("target task not found".to_string()),
                Some(Error::post_hook(root, &hook.task, Error::task_not_found(&hook.task))),
            );
        };

        if self.state.options.dry_run {
            println!("[dry-run] hook {}", target.name);
            return (HookStatus::DryRun, None);
        }

        if self.state.options.verbose {
            println!("[hook] task {} ({trigger})", target.name);
        } else {
            println!("→ {} (post)", target.name);
        }

        match run_commands(&self.state, target).await {
            Ok(()) => (HookStatus::Succeeded, None),
            Err(e) => {
                tracing::error!(root = %root, hook = %hook.task, error = %e, "post-hook failed");
                (
                    HookStatus::Failed(e.to_string()),
                    Some(Error::post_hook(root, &hook.task, e)),
                )
            }
        }
    }
}
