//! Render surface: the visible destination for downscaled images.
//!
//! The surface supports exactly three operations — clear, draw a bitmap at
//! the origin (resizing the surface to match), and read back the current
//! content for export. It is exclusively owned by the pipeline and written
//! only from its stages.

use crate::imaging::Bitmap;

/// A 2D drawable area.
pub trait RenderSurface {
    /// Reset to the blank state, discarding any drawn content.
    fn clear(&mut self);

    /// Resize the surface to the bitmap's dimensions and draw it at the origin.
    fn draw(&mut self, bitmap: &Bitmap);

    /// Current content, if anything has been drawn since the last clear.
    fn content(&self) -> Option<&Bitmap>;
}

/// In-memory surface holding at most one drawn bitmap.
#[derive(Debug, Default)]
pub struct PixelSurface {
    content: Option<Bitmap>,
}

impl PixelSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for PixelSurface {
    fn clear(&mut self) {
        self.content = None;
    }

    fn draw(&mut self, bitmap: &Bitmap) {
        self.content = Some(bitmap.clone());
    }

    fn content(&self) -> Option<&Bitmap> {
        self.content.as_ref()
    }
}
