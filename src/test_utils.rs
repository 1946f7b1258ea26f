//! Test utilities and fixtures for mp3pic tests.
//!
//! Provides in-memory images and a minimal MP3 file so tag tests don't
//! depend on fixtures checked into the repository.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{solid_image, encode_image, write_silent_mp3};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mp3 = write_silent_mp3(dir.path(), "song.mp3");
//! let png = encode_image(&solid_image(100, 100, [255, 0, 0]), ImageFormat::Png);
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no CRC/padding
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];

/// 144 * 128000 / 44100, rounded down
const FRAME_LEN: usize = 417;

const FRAME_COUNT: usize = 40;

/// Creates a single-color RGB image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Encodes an image in memory.
pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), format)
        .expect("Failed to encode test image");
    data
}

/// Writes an image file into `dir` and returns its path.
pub fn write_image(dir: &Path, name: &str, image: &DynamicImage, format: ImageFormat) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_image(image, format)).expect("Failed to write test image");
    path
}

/// Bytes of an untagged MP3 stream of silent-ish frames (about one second).
pub fn silent_mp3_bytes() -> Vec<u8> {
    let mut data = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    data
}

/// Writes an untagged MP3 file into `dir` and returns its path.
pub fn write_silent_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, silent_mp3_bytes()).expect("Failed to write test mp3");
    path
}
