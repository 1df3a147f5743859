//! Post-hook configuration types

use serde::{Deserialize, Serialize};
use wrkit_core::PostHook;

/// A follow-up task declared under `post:`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Task whose commands the hook runs
    pub task: String,
    /// Trigger as written: `success`, `always`, `fail` and friends. Empty means success.
    #[serde(default)]
    pub when: String,
}

impl HookConfig {
    pub fn into_post_hook(self) -> PostHook {
        PostHook::new(self.task, self.when)
    }
}
