//! Command-line interface for mp3pic.
//!
//! Parses arguments, checks the input files and runs the embed command.

mod commands;

pub use commands::{Cli, run_command};
