//! CLI argument definitions and dispatch.
//!
//! mp3pic has a single command, implemented in `embed`. This module holds
//! the argument parser and the path checks and naming rules around it.

mod embed;

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::cover::FitOptions;
use crate::error::{Error, Result};

pub use embed::cmd_embed;

/// Add a picture tag to a mp3 file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the source mp3 file. The modified version is given a new name.
    pub mp3_file: PathBuf,

    /// Image file to use as the cover picture (.jpeg, .jpg or .png)
    pub image_file: PathBuf,

    /// Output file. Defaults to the source name with a date_time stamp added.
    /// An existing file is never replaced.
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Delete existing ID3 tags before adding the picture tag
    #[arg(short, long)]
    pub delete_tags: bool,

    /// Keep the temporary image file used to add the picture tag
    #[arg(short, long)]
    pub keep_image: bool,

    /// JPEG quality for the embedded picture (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Config file (default: mp3pic/config.toml in the user config directory)
    #[arg(short, long, env = "MP3PIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fit options from config, with command-line overrides applied.
    pub fn fit_options(&self, config: &Config) -> Result<FitOptions> {
        let mut options = config.fit_options()?;
        if let Some(quality) = self.quality {
            options.jpeg_quality = quality;
        }
        Ok(options)
    }

    /// Keep the temporary image if asked on the command line or in config.
    pub fn keeps_image(&self, config: &Config) -> bool {
        self.keep_image || config.output.keep_image
    }
}

/// Run the command described by the parsed arguments.
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    cmd_embed(cli, config)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Check if a path has one of the given extensions (case-insensitive)
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Check the input files exist and have supported extensions, and that an
/// explicit output file does not exist yet.
pub(crate) fn validate_paths(mp3: &Path, image: &Path, output: Option<&Path>) -> Result<()> {
    if !mp3.exists() {
        return Err(Error::not_found(mp3));
    }
    if !has_extension(mp3, &["mp3"]) {
        return Err(Error::invalid_input(format!(
            "Not a mp3 file name: '{}'",
            mp3.display()
        )));
    }

    if !image.exists() {
        return Err(Error::not_found(image));
    }
    if !has_extension(image, IMAGE_EXTENSIONS) {
        return Err(Error::invalid_input(format!(
            "Not a supported image file type: '{}'",
            image.display()
        )));
    }

    if let Some(output) = output
        && output.exists()
    {
        return Err(Error::OutputExists(output.to_path_buf()));
    }
    Ok(())
}

/// Timestamp used in generated file names, e.g. `261016_143005`
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%y%m%d_%H%M%S").to_string()
}

/// `<dir>/<stem>__<stamp>.mp3` next to the source mp3
pub(crate) fn default_output_path(mp3: &Path, stamp: &str) -> PathBuf {
    let stem = file_stem(mp3);
    mp3.with_file_name(format!("{stem}__{stamp}.mp3"))
}

/// `<output dir>/<image stem>__<stamp>.<ext>`
pub(crate) fn temp_image_path(output: &Path, image: &Path, stamp: &str, ext: &str) -> PathBuf {
    let stem = file_stem(image);
    output.with_file_name(format!("{stem}__{stamp}.{ext}"))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
