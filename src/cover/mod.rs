//! Cover art fitting.
//!
//! Turns an arbitrary source image into fixed-size square artwork ready for
//! embedding in an ID3 tag:
//!
//! 1. **Zoom** - scale uniformly until the image covers the target on both axes
//! 2. **Center crop** - trim the overshooting axis evenly from both sides
//! 3. **Compose** - paste onto a white canvas of exactly the target size
//! 4. **Encode** - JPEG (reduced quality) or PNG
//!
//! Every step returns a new image value; nothing is modified in place.

mod compose;
pub mod geometry;

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use compose::{encode, fit_artwork, fit_image};
pub use geometry::{CropBox, Size};

/// Default artwork size (300x300 is what most players expect)
pub const DEFAULT_TARGET_SIZE: Size = Size::new(300, 300);

/// JPEG quality (1-100). Lower than the usual 75 to keep tags compact.
pub const DEFAULT_JPEG_QUALITY: u8 = 60;

/// Encoded artwork formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkFormat {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
}

impl ArtworkFormat {
    /// Output format matching a source image: PNG stays PNG, everything else
    /// becomes JPEG.
    pub fn for_source(source: ImageFormat) -> Self {
        match source {
            ImageFormat::Png => Self::Png,
            _ => Self::Jpeg,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension used for the temporary artwork file
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl TryFrom<ImageFormat> for ArtworkFormat {
    type Error = Error;

    fn try_from(format: ImageFormat) -> Result<Self> {
        match format {
            ImageFormat::Jpeg => Ok(Self::Jpeg),
            ImageFormat::Png => Ok(Self::Png),
            other => Err(Error::unsupported_format(format!("{other:?}"))),
        }
    }
}

impl FromStr for ArtworkFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(Error::unsupported_format(s)),
        }
    }
}

impl fmt::Display for ArtworkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        })
    }
}

/// Settings for a single fit-and-encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitOptions {
    pub target_size: Size,
    pub jpeg_quality: u8,
    /// `None` follows the source format (see [`ArtworkFormat::for_source`])
    pub format: Option<ArtworkFormat>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            format: None,
        }
    }
}

impl FitOptions {
    /// Reject sizes and qualities the geometry and encoder cannot handle.
    pub fn validate(&self) -> Result<()> {
        if self.target_size.is_empty() {
            return Err(Error::config(format!(
                "artwork size must be positive, got {}",
                self.target_size
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

/// Encoded artwork ready for embedding.
#[derive(Debug, Clone)]
pub struct FittedArtwork {
    /// Raw image data (JPEG or PNG)
    pub data: Vec<u8>,
    pub format: ArtworkFormat,
    /// Always equal to the requested target size
    pub size: Size,
}

impl FittedArtwork {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
