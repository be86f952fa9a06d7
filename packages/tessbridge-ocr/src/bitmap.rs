use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Weak};

use image::{ColorType, DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::engine::Result;

/// Scan resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Resolution {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn uniform(dpi: f32) -> Self {
        Self::new(dpi, dpi)
    }

    /// Single DPI value for engines that only take one, rounded from the
    /// larger axis. `None` when neither axis holds a usable value.
    pub fn ppi(&self) -> Option<i32> {
        let dpi = self.horizontal.max(self.vertical).round();
        if dpi.is_finite() && dpi >= 1.0 && dpi <= i32::MAX as f32 {
            Some(dpi as i32)
        } else {
            None
        }
    }
}

/// Decoded pixels plus the resolution they were scanned at.
///
/// Pixels are shared: cloning a `Bitmap` is cheap and both clones refer to
/// the same allocation.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: Arc<DynamicImage>,
    resolution: Option<Resolution>,
}

/// Non-owning reference to a [`Bitmap`].
#[derive(Debug, Clone)]
pub struct WeakBitmap {
    pixels: Weak<DynamicImage>,
    resolution: Option<Resolution>,
}

impl WeakBitmap {
    /// True once every owning `Bitmap` has been dropped.
    pub fn is_released(&self) -> bool {
        self.pixels.strong_count() == 0
    }

    pub fn upgrade(&self) -> Option<Bitmap> {
        self.pixels.upgrade().map(|pixels| Bitmap {
            pixels,
            resolution: self.resolution,
        })
    }
}

impl Bitmap {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            pixels: Arc::new(image),
            resolution: None,
        }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Decodes an image file. The resolution is left unknown.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Ok(Self::new(image))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn color(&self) -> ColorType {
        self.pixels.color()
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Whether both bitmaps share the same pixel allocation.
    pub fn ptr_eq(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    pub fn downgrade(&self) -> WeakBitmap {
        WeakBitmap {
            pixels: Arc::downgrade(&self.pixels),
            resolution: self.resolution,
        }
    }

    /// Copies the pixels into a fresh 32-bit RGBA bitmap of the same size,
    /// drawn unscaled at the origin, keeping the resolution.
    pub fn to_rgba8(&self) -> Bitmap {
        Bitmap {
            pixels: Arc::new(DynamicImage::ImageRgba8(self.pixels.to_rgba8())),
            resolution: self.resolution,
        }
    }

    /// PNG encoding of the pixels, for engines that take encoded images.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
