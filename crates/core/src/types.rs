//! Domain types shared by the loader and the scheduling core.

pub mod tasks;
pub mod variables;

pub use tasks::{HookTrigger, PostHook, TaskDefinition, TaskSet};
pub use variables::Variables;
