//! Core domain types, errors and constants for `wrkit`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum, `Result` alias and the `Failure` tag that
//!   separates fatal task failures from best-effort hook problems.
//! - **`types`**: `TaskDefinition`, `PostHook`, `TaskSet` and the merged
//!   `Variables` environment.
//! - **`template`**: renders `{{.NAME}}` command templates.
//! - **`constants`**: shared file names and environment variable names.

pub mod constants;
pub mod errors;
pub mod template;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Failure, Result},
    template::render,
    types::*,
};
