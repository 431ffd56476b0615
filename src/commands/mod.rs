//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands drive the library the way an embedding application would.

pub mod demo;
pub mod models;

// Re-export main command functions
pub use demo::{execute_demo, execute_styles, validate_args};
pub use models::DemoArgs;
