//! Pure Rust decode backend — zero external dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header read only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with the configured filter |

use super::backend::{BackendError, Bitmap, DecodeBackend, Dimensions};
use super::params::DecodeParams;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in and known to work.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Decode backend built on the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct ImageCrateBackend;

impl ImageCrateBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageCrateBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::DecodeFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

impl DecodeBackend for ImageCrateBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::DecodeFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, params: &DecodeParams) -> Result<Bitmap, BackendError> {
        let img = load_image(&params.source)?;
        let img = match &params.resize {
            // resize_exact: the target dimensions already carry the aspect ratio
            Some(target) => img.resize_exact(target.width, target.height, target.quality.filter()),
            None => img,
        };
        Ok(Bitmap::from_pixels(img.into_rgba8()))
    }
}
