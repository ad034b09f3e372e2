//! CLI module
//!
//! Command-line interface for exercising destinations.
//!
//! # Commands
//!
//! - `list` - List built-in destinations
//! - `fields` - Show a destination's settings-field schema
//! - `check` - Test credentials against the remote API
//! - `send` - Deliver a batch of events from a payload file

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
