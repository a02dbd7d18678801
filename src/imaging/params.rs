//! Parameter types for decode operations.
//!
//! These structs describe *what* to decode, not *how*. They are the interface
//! between the [`pipeline`](crate::pipeline) (which decides what it needs)
//! and the [`backend`](super::backend) (which does the pixel work), so a
//! recording mock can stand in for the real decoder in tests.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resampling quality for a resized decode.
///
/// Mirrors the low/medium/high quality levels of browser-style bitmap
/// decoding. The pipeline always requests [`ResizeQuality::High`] unless
/// configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeQuality {
    /// Nearest-neighbor. Fast, blocky.
    Low,
    /// Linear triangle filter.
    Medium,
    /// Lanczos3 windowed sinc.
    #[default]
    High,
}

impl ResizeQuality {
    pub fn filter(self) -> FilterType {
        match self {
            Self::Low => FilterType::Nearest,
            Self::Medium => FilterType::Triangle,
            Self::High => FilterType::Lanczos3,
        }
    }
}

/// Resize applied during decode: exact output dimensions plus quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
    pub quality: ResizeQuality,
}

/// Full specification for a decode: source file and optional resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeParams {
    pub source: PathBuf,
    pub resize: Option<ResizeTarget>,
}

impl DecodeParams {
    /// Decode at natural dimensions.
    pub fn full(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            resize: None,
        }
    }

    /// Decode resized to exactly `width` × `height`.
    pub fn resized(source: &Path, width: u32, height: u32, quality: ResizeQuality) -> Self {
        Self {
            source: source.to_path_buf(),
            resize: Some(ResizeTarget {
                width,
                height,
                quality,
            }),
        }
    }
}
