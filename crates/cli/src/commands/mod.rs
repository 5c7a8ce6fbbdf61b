//! CLI command implementations.
//!
//! Each command works on a store borrowed from the session opened in
//! `main` and returns the text to print, so the commands can be tested
//! without capturing stdout.

pub mod cart;
pub mod wishlist;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// JSON output could not be produced.
    #[error("Failed to render JSON: {0}")]
    Render(#[from] serde_json::Error),
}

/// How `show` commands format their output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}
