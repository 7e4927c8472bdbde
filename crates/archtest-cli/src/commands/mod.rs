//! Subcommand implementations.

pub mod check;
pub mod graph;
pub mod init;
pub mod list_patterns;
pub mod output;
pub mod types;
