//! Task scheduling and execution for wrkit
//!
//! Builds the dependency graph from a `TaskSet`, partitions the closure of a
//! requested task into waves, runs each wave with parallel batches and
//! sequential barriers, then dispatches the root task's post-hooks.

pub mod command_executor;
pub mod executor;
pub mod graph;
mod hooks;

pub use command_executor::*;
pub use executor::*;
pub use graph::TaskGraph;
