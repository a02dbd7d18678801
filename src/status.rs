//! Status display: the two text slots the pipeline publishes into.
//!
//! Format functions are pure — no I/O, no side effects — with
//! [`StatusBoard`] as the thin stateful holder an embedder reads from.
//! Each publish overwrites its slot; failures leave slots as-is.

use crate::imaging::Dimensions;

/// Destination line shown when the source already meets the policy.
pub const NO_DOWNSCALE_STATUS: &str =
    "No downscale necessary, source image meets resolution requirements";

/// `Source image resolution: {w}x{h}`
pub fn format_source_status(dims: Dimensions) -> String {
    format!("Source image resolution: {}x{}", dims.width, dims.height)
}

/// `Downscaled image resolution: {w}x{h}`
pub fn format_destination_status(dims: Dimensions) -> String {
    format!("Downscaled image resolution: {}x{}", dims.width, dims.height)
}

/// Two-slot status display: one line for the source image, one for the
/// downscale result.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    source: Option<String>,
    destination: Option<String>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = Some(text.into());
    }

    pub fn set_destination(&mut self, text: impl Into<String>) {
        self.destination = Some(text.into());
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }
}
