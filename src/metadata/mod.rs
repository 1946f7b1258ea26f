//! ID3 tag editing for the cover picture.
//!
//! Uses the lofty crate for tag access. Only what mp3pic needs is exposed:
//! - Delete all existing tags from a file
//! - Insert (or replace) the front cover picture
//! - Read the front cover back for verification

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Tag, TagType};
use std::path::Path;
use tracing::{debug, info};

use crate::cover::{ArtworkFormat, FittedArtwork};
use crate::error::{Error, Result};

/// Description stored with the embedded picture
pub const COVER_DESCRIPTION: &str = "Cover Art (front)";

/// Picture read back from a file's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedCover {
    pub mime_type: Option<String>,
    pub description: Option<String>,
    pub data: Vec<u8>,
}

fn open(path: &Path) -> Result<TaggedFile> {
    Probe::open(path)
        .map_err(|e| Error::tag(path, e))?
        .guess_file_type()?
        .read()
        .map_err(|e| Error::tag(path, e))
}

fn picture_mime(format: ArtworkFormat) -> MimeType {
    match format {
        ArtworkFormat::Jpeg => MimeType::Jpeg,
        ArtworkFormat::Png => MimeType::Png,
    }
}

/// Remove every tag (ID3v2, ID3v1, APE) from the file on disk.
///
/// Returns `false` if the file had no tags to begin with.
pub fn delete_tags(path: &Path) -> Result<bool> {
    let tagged_file = open(path)?;
    let tag_types: Vec<TagType> = tagged_file.tags().iter().map(|t| t.tag_type()).collect();

    if tag_types.is_empty() {
        return Ok(false);
    }

    for tag_type in tag_types {
        debug!("Removing {:?} tag from {}", tag_type, path.display());
        tag_type
            .remove_from_path(path)
            .map_err(|e| Error::tag(path, e))?;
    }
    Ok(true)
}

/// Embed artwork as the front cover, replacing any existing front cover.
///
/// Creates the file's primary tag (ID3v2 for MP3) if it has none.
pub fn embed_cover(path: &Path, artwork: &FittedArtwork) -> Result<()> {
    let mut tagged_file = open(path)?;
    let tag_type = tagged_file.primary_tag_type();

    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
        info!("Added tags.");
    }
    let Some(tag) = tagged_file.tag_mut(tag_type) else {
        return Err(Error::invalid_input(format!(
            "Cannot create {:?} tag for '{}'",
            tag_type,
            path.display()
        )));
    };

    let picture = Picture::new_unchecked(
        PictureType::CoverFront,
        Some(picture_mime(artwork.format)),
        Some(COVER_DESCRIPTION.to_string()),
        artwork.data.clone(),
    );

    tag.remove_picture_type(PictureType::CoverFront);
    tag.push_picture(picture);

    tagged_file
        .save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::tag(path, e))?;

    debug!(
        "Embedded {} cover ({} bytes) in {}",
        artwork.mime_type(),
        artwork.data.len(),
        path.display()
    );
    Ok(())
}

/// Read the front cover (or the first picture) from the file's tags.
pub fn read_cover(path: &Path) -> Result<Option<EmbeddedCover>> {
    let tagged_file = open(path)?;

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(None);
    };

    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first());

    Ok(picture.map(|p| EmbeddedCover {
        mime_type: p.mime_type().map(|m| m.as_str().to_string()),
        description: p.description().map(str::to_string),
        data: p.data().to_vec(),
    }))
}
