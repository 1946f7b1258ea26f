//! Zoom and crop geometry for fitting artwork into a fixed canvas.
//!
//! Everything here is plain integer/float arithmetic over [`Size`] values.
//! Both the current and target sizes must have non-zero dimensions.

use std::fmt;

use image::GenericImageView;

/// Pixel dimensions of an image or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of any image view.
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle given by its top-left `(x1, y1)` and exclusive bottom-right
/// `(x2, y2)` corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropBox {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Restrict the box to the bounds of an image of `size`.
    pub fn clamp_to(&self, size: Size) -> Self {
        let x2 = self.x2.min(size.width);
        let y2 = self.y2.min(size.height);
        Self {
            x1: self.x1.min(x2),
            y1: self.y1.min(y2),
            x2,
            y2,
        }
    }

    /// True when the box lies entirely within an image of `size`.
    pub fn fits_within(&self, size: Size) -> bool {
        self.x2 <= size.width && self.y2 <= size.height
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// The smallest uniform scale that makes `current` cover `target` on both axes.
pub fn zoom_scale(current: Size, target: Size) -> f64 {
    let scale_w = f64::from(target.width) / f64::from(current.width);
    let scale_h = f64::from(target.height) / f64::from(current.height);
    scale_w.max(scale_h)
}

/// Size of `current` after zooming by [`zoom_scale`].
///
/// Dimensions are truncated, so the result can come up one pixel short of
/// `target` on the tighter axis. A dimension never truncates below 1.
pub fn zoom_size(current: Size, target: Size) -> Size {
    let scale_by = zoom_scale(current, target);
    let scaled = |dim: u32| ((f64::from(dim) * scale_by) as u32).max(1);
    Size::new(scaled(current.width), scaled(current.height))
}

/// Crop box that trims `current` down to `target`, centered on each axis.
///
/// An odd leftover pixel is taken from the trailing edge. On an axis where
/// `target` is not smaller than `current` the box spans `0..target`, which
/// extends past the image when `current` is smaller; see
/// [`CropBox::clamp_to`].
pub fn crop_box(current: Size, target: Size) -> CropBox {
    let (x1, x2) = centered_span(current.width, target.width);
    let (y1, y2) = centered_span(current.height, target.height);
    CropBox { x1, y1, x2, y2 }
}

fn centered_span(current: u32, target: u32) -> (u32, u32) {
    if target < current {
        let excess = current - target;
        let before = excess / 2;
        (before, current - (before + excess % 2))
    } else {
        (0, target)
    }
}
