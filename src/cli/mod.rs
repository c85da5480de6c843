//! CLI command handlers
//!
//! Each command group is implemented in its own module with a `handle`
//! entry point; `main.rs` only parses arguments and dispatches.

pub mod dash;
pub mod helpers;
pub mod logs;
pub mod revenue;
pub mod system;
