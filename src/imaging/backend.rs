//! Decode backend trait and shared pixel types.
//!
//! The [`DecodeBackend`] trait defines the two operations the pipeline needs:
//! identify (header-only dimension read) and decode (full decode with an
//! optional resize). The production implementation is
//! [`ImageCrateBackend`](super::image_backend::ImageCrateBackend) — pure
//! Rust, statically linked.

use super::params::DecodeParams;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    DecodeFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Total pixel count, widened so large images can't overflow.
    pub fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A decoded image: dimensions plus drawable RGBA pixel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// An opaque black bitmap of the given size. Used for capability probes
    /// and as a stand-in in recording test backends.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Trait for image decode backends.
///
/// `identify` must not decode pixel data — the pipeline calls it on every
/// selected file, including ones that already meet the resolution policy.
pub trait DecodeBackend {
    /// Read image dimensions from the file header.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the file, applying the resize in `params` when present.
    fn decode(&self, params: &DecodeParams) -> Result<Bitmap, BackendError>;
}
