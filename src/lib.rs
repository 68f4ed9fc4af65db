//! spotback library
//!
//! Backs up Spotify playlists: authenticates a user through the OAuth2
//! authorization-code flow, fetches playlists and their complete track
//! listings, and serializes a selection to JSON, CSV, XML or a ZIP of CSVs.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading and the `Settings` context
//! - `error` - Typed errors of every public operation
//! - `export` - Pure export formatters
//! - `management` - Session state and login handoffs
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client (token exchange, pagination, aggregation)
//! - `types` - Data structures of the Spotify object graph
//! - `utils` - Small helpers shared by several modules

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// ```
/// info!("Found {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1.
///
/// Only the command layer uses this; library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
