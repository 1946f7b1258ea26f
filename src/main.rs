//! mp3pic - add a cover picture tag to an mp3 file.
//!
//! The cover image is zoomed and center-cropped to a fixed square (300x300
//! by default), encoded, and embedded as the front cover in the ID3 tag of
//! a copy of the mp3. The source mp3 is never modified.

pub mod cli;
pub mod config;
pub mod cover;
pub mod error;
pub mod metadata;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const APP_TITLE: &str = concat!("mp3pic (v", env!("CARGO_PKG_VERSION"), ")");

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logging
    let default_level = if args.verbose { "mp3pic=debug" } else { "mp3pic=info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    println!("\n{APP_TITLE}\n");

    let config = match &args.config {
        Some(path) => match config::load_from(path) {
            Ok(config) => config,
            Err(e) => return error_exit(&anyhow::Error::from(e), false),
        },
        None => config::load(),
    };

    match cli::run_command(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => error_exit(&e, config.output.pause_on_error),
    }
}

/// Report a fatal error, optionally waiting for the user to acknowledge it
fn error_exit(err: &anyhow::Error, pause: bool) -> ExitCode {
    eprintln!("ERROR: {err:#}");
    println!("{}", "*".repeat(70));
    if pause {
        print!("ERRORS: Press [Enter]. ");
        let _ = std::io::stdout().flush();
        let _ = std::io::stdin().lock().read_line(&mut String::new());
    } else {
        println!("Halted due to errors.");
    }
    ExitCode::FAILURE
}
