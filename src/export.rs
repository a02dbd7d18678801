//! Export capability: serialize surface content to PNG and deliver it.
//!
//! The production implementation writes into a target directory (the
//! download-directory analog). [`ExportSink::probe`] exists so an embedder
//! can surface permission problems before the user runs a full pipeline.

use crate::imaging::Bitmap;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encode failed: {0}")]
    EncodeFailed(String),
}

/// Serializes bitmap content to an image byte encoding and delivers it
/// under a caller-derived filename.
pub trait ExportSink {
    /// Export the bitmap as PNG, returning the delivered location.
    fn export(&mut self, bitmap: &Bitmap, filename: &str) -> Result<PathBuf, ExportError>;

    /// Verify the capability is usable without exporting real content.
    fn probe(&mut self) -> Result<(), ExportError>;
}

/// Exports PNGs into a fixed target directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileExporter {
    target_dir: PathBuf,
}

impl FileExporter {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl ExportSink for FileExporter {
    fn export(&mut self, bitmap: &Bitmap, filename: &str) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.target_dir)?;
        let path = self.target_dir.join(filename);

        let file = std::fs::File::create(&path)?;
        let writer = std::io::BufWriter::new(file);
        PngEncoder::new(writer)
            .write_image(
                bitmap.pixels().as_raw(),
                bitmap.width(),
                bitmap.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| ExportError::EncodeFailed(e.to_string()))?;
        Ok(path)
    }

    fn probe(&mut self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.target_dir)?;
        let scratch = self.target_dir.join(".export-probe");
        std::fs::write(&scratch, b"")?;
        std::fs::remove_file(&scratch)?;
        Ok(())
    }
}
