//! Configuration parsing and loading for wrkit
//!
//! This crate reads `wrkit.yaml` documents, layers the local document over the
//! global master document and converts the result into the `TaskSet` the
//! scheduler consumes.

pub mod config;
pub mod loader;
pub mod parser;

pub use config::Config;
pub use loader::ConfigLoader;
pub use parser::*;
