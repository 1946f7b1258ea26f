//! Zoom, crop, paste and encode.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, info};

use super::geometry::{self, Size};
use super::{ArtworkFormat, FitOptions, FittedArtwork};
use crate::error::{Error, Result};

/// Canvas fill, visible only where the fitted image falls short
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Decode `data`, fit it to the target size and encode the result.
///
/// Fails with [`Error::Decode`] if `data` is not a readable image.
pub fn fit_artwork(data: &[u8], options: &FitOptions) -> Result<FittedArtwork> {
    options.validate()?;

    let source_format = image::guess_format(data).map_err(Error::Decode)?;
    let source =
        image::load_from_memory_with_format(data, source_format).map_err(Error::Decode)?;
    let format = options
        .format
        .unwrap_or_else(|| ArtworkFormat::for_source(source_format));

    let canvas = fit_image(&source, options.target_size);
    let data = encode(&canvas, format, options.jpeg_quality)?;

    debug!(
        "Fitted {:?} artwork -> {} {} ({} bytes)",
        source_format,
        format,
        options.target_size,
        data.len()
    );

    Ok(FittedArtwork {
        data,
        format,
        size: Size::of(&canvas),
    })
}

/// Fit `source` onto a white canvas of exactly `target` pixels.
///
/// The source is zoomed to cover the target and center-cropped. Truncation
/// in the zoom can leave the fitted image one pixel short on its tighter
/// axis; that strip keeps the canvas background.
pub fn fit_image(source: &DynamicImage, target: Size) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(target.width, target.height, BACKGROUND);

    let current = Size::of(source);
    let fitted = if current == target {
        source.to_rgb8()
    } else {
        info!("Initial image size is {}.", current);
        let fitted = zoom_and_crop(source, target);
        info!("New image size is {}.", Size::of(&fitted));
        fitted.to_rgb8()
    };

    if Size::of(&fitted) != target {
        debug!(
            "Fitted image {} does not cover {} canvas, padding with background",
            Size::of(&fitted),
            target
        );
    }

    imageops::replace(&mut canvas, &fitted, 0, 0);
    canvas
}

fn zoom_and_crop(source: &DynamicImage, target: Size) -> DynamicImage {
    let new_size = geometry::zoom_size(Size::of(source), target);
    info!("Resizing to {}.", new_size);
    let resized = source.resize_exact(new_size.width, new_size.height, FilterType::Lanczos3);

    if new_size == target {
        return resized;
    }

    let crop = geometry::crop_box(new_size, target);
    info!("Cropping to box {}.", crop);
    if !crop.fits_within(new_size) {
        debug!("Crop box {} exceeds {} image, clamping", crop, new_size);
    }
    let crop = crop.clamp_to(new_size);
    resized.crop_imm(crop.x1, crop.y1, crop.width(), crop.height())
}

/// Encode a canvas as JPEG (at `jpeg_quality`) or PNG.
pub fn encode(canvas: &RgbImage, format: ArtworkFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    match format {
        ArtworkFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut output, jpeg_quality);
            encoder.encode_image(canvas).map_err(Error::Encode)?;
        }
        ArtworkFormat::Png => {
            canvas
                .write_with_encoder(PngEncoder::new(&mut output))
                .map_err(Error::Encode)?;
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{encode_image, solid_image};
    use image::{GenericImageView, ImageFormat};

    const TARGET: Size = Size::new(300, 300);
    const RED: [u8; 3] = [220, 20, 20];
    const BLUE: [u8; 3] = [20, 20, 220];

    fn is_close(pixel: &Rgb<u8>, expected: [u8; 3]) -> bool {
        pixel
            .0
            .iter()
            .zip(expected)
            .all(|(&a, b)| a.abs_diff(b) <= 12)
    }

    /// 600x300 image: red outer quarters, blue center half
    fn banded_wide_image() -> DynamicImage {
        let img = RgbImage::from_fn(600, 300, |x, _| {
            if (150..450).contains(&x) {
                Rgb(BLUE)
            } else {
                Rgb(RED)
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_wide_image_keeps_center() {
        let canvas = fit_image(&banded_wide_image(), TARGET);
        assert_eq!(Size::of(&canvas), TARGET);
        for x in [5, 150, 294] {
            let pixel = canvas.get_pixel(x, 150);
            assert!(is_close(pixel, BLUE), "pixel at x={x} was {pixel:?}");
        }
    }

    #[test]
    fn test_tall_image_keeps_center() {
        let img = RgbImage::from_fn(300, 450, |_, y| {
            if (75..375).contains(&y) {
                Rgb(BLUE)
            } else {
                Rgb(RED)
            }
        });
        let canvas = fit_image(&DynamicImage::ImageRgb8(img), TARGET);
        assert_eq!(Size::of(&canvas), TARGET);
        for y in [5, 150, 294] {
            assert!(is_close(canvas.get_pixel(150, y), BLUE));
        }
    }

    #[test]
    fn test_small_image_is_scaled_up_without_border() {
        let canvas = fit_image(&solid_image(150, 150, RED), TARGET);
        assert_eq!(Size::of(&canvas), TARGET);
        for (x, y) in [(0, 0), (299, 0), (0, 299), (299, 299), (150, 150)] {
            let pixel = canvas.get_pixel(x, y);
            assert!(is_close(pixel, RED), "pixel at ({x}, {y}) was {pixel:?}");
        }
    }

    #[test]
    fn test_exact_size_is_untouched() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_fn(300, 300, |x, y| {
            Rgb([x as u8, y as u8, (x ^ y) as u8])
        }));
        let canvas = fit_image(&source, TARGET);
        assert_eq!(canvas, source.to_rgb8());

        let direct = encode(&source.to_rgb8(), ArtworkFormat::Png, 60).unwrap();
        let fitted = encode(&canvas, ArtworkFormat::Png, 60).unwrap();
        assert_eq!(direct, fitted);
    }

    #[test]
    fn test_alpha_is_dropped() {
        let source = DynamicImage::new_rgba8(64, 64);
        let canvas = fit_image(&source, Size::new(32, 32));
        assert_eq!(Size::of(&canvas), Size::new(32, 32));
    }

    #[test]
    fn test_non_square_target() {
        let canvas = fit_image(&banded_wide_image(), Size::new(120, 80));
        assert_eq!(Size::of(&canvas), Size::new(120, 80));
    }

    #[test]
    fn test_fit_artwork_jpeg_round_trip() {
        let data = encode_image(&banded_wide_image(), ImageFormat::Jpeg);
        let artwork = fit_artwork(&data, &FitOptions::default()).unwrap();

        assert_eq!(artwork.format, ArtworkFormat::Jpeg);
        assert_eq!(artwork.mime_type(), "image/jpeg");
        assert_eq!(artwork.size, TARGET);

        let decoded = image::load_from_memory_with_format(&artwork.data, ImageFormat::Jpeg)
            .expect("artwork should decode");
        assert_eq!(decoded.dimensions(), (300, 300));
    }

    #[test]
    fn test_fit_artwork_png_source_stays_png() {
        let data = encode_image(&solid_image(40, 90, BLUE), ImageFormat::Png);
        let artwork = fit_artwork(&data, &FitOptions::default()).unwrap();

        assert_eq!(artwork.format, ArtworkFormat::Png);
        assert_eq!(image::guess_format(&artwork.data).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&artwork.data).unwrap();
        assert_eq!(decoded.dimensions(), (300, 300));
    }

    #[test]
    fn test_fit_artwork_forced_format() {
        let data = encode_image(&solid_image(40, 40, BLUE), ImageFormat::Png);
        let options = FitOptions {
            format: Some(ArtworkFormat::Jpeg),
            target_size: Size::new(64, 64),
            ..FitOptions::default()
        };
        let artwork = fit_artwork(&data, &options).unwrap();
        assert_eq!(artwork.format, ArtworkFormat::Jpeg);
        assert_eq!(image::guess_format(&artwork.data).unwrap(), ImageFormat::Jpeg);
        assert_eq!(artwork.size, Size::new(64, 64));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(300, 300, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
        }));
        let canvas = fit_image(&img, TARGET);
        let low = encode(&canvas, ArtworkFormat::Jpeg, 30).unwrap();
        let high = encode(&canvas, ArtworkFormat::Jpeg, 95).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = fit_artwork(b"definitely not an image", &FitOptions::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_truncated_image_is_decode_error() {
        let mut data = encode_image(&solid_image(64, 64, RED), ImageFormat::Png);
        data.truncate(40);
        let result = fit_artwork(&data, &FitOptions::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let data = encode_image(&solid_image(10, 10, RED), ImageFormat::Png);
        let options = FitOptions {
            target_size: Size::new(300, 0),
            ..FitOptions::default()
        };
        assert!(matches!(fit_artwork(&data, &options), Err(Error::Config(_))));
    }
}
