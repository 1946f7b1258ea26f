//! Embed command: fit the cover image and write it into a copy of the mp3.

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::cover::{self, FittedArtwork};
use crate::error::Error;
use crate::metadata;

use super::{Cli, default_output_path, temp_image_path, timestamp, validate_paths};

/// Copy the mp3 and add the fitted cover picture to the copy
pub fn cmd_embed(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let stamp = timestamp();

    validate_paths(&cli.mp3_file, &cli.image_file, cli.output_file.as_deref())?;
    let options = cli.fit_options(config)?;

    println!("Reading '{}'", cli.mp3_file.display());

    let output_path = cli
        .output_file
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.mp3_file, &stamp));

    println!("Writing '{}'", output_path.display());

    if output_path.exists() {
        return Err(Error::OutputExists(output_path).into());
    }

    println!("Adding cover image '{}'", cli.image_file.display());
    let source = fs::read(&cli.image_file)
        .with_context(|| format!("Failed to read '{}'", cli.image_file.display()))?;
    let artwork = cover::fit_artwork(&source, &options)?;
    println!("  Embedding {} image, {}.", artwork.format, artwork.size);

    let tmpimg_path = temp_image_path(
        &output_path,
        &cli.image_file,
        &stamp,
        artwork.format.extension(),
    );
    fs::write(&tmpimg_path, &artwork.data)
        .with_context(|| format!("Failed to write '{}'", tmpimg_path.display()))?;

    let result = write_output(cli, &output_path, &artwork);

    if cli.keeps_image(config) {
        println!("Temporary image '{}' not deleted.", tmpimg_path.display());
    } else if let Err(e) = fs::remove_file(&tmpimg_path) {
        tracing::warn!("Could not delete '{}': {}", tmpimg_path.display(), e);
    }

    result
}

/// Make a copy of the mp3 file, then modify the copy
fn write_output(cli: &Cli, output_path: &Path, artwork: &FittedArtwork) -> anyhow::Result<()> {
    fs::copy(&cli.mp3_file, output_path).with_context(|| {
        format!(
            "Failed to copy '{}' to '{}'",
            cli.mp3_file.display(),
            output_path.display()
        )
    })?;

    if cli.delete_tags {
        if metadata::delete_tags(output_path)? {
            println!("Delete existing tags.");
        } else {
            println!("No existing tags.");
        }
    }

    metadata::embed_cover(output_path, artwork)?;

    match metadata::read_cover(output_path)? {
        Some(embedded) => tracing::debug!(
            "Verified {} cover '{}': {} bytes",
            embedded.mime_type.as_deref().unwrap_or("unknown"),
            embedded.description.as_deref().unwrap_or_default(),
            embedded.data.len()
        ),
        None => anyhow::bail!("Cover picture missing from '{}'", output_path.display()),
    }

    Ok(())
}
