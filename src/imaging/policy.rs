//! Pure resolution-policy math.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Default pixel-count ceiling: the non-free content resolution limit
/// (width × height) used by Wikipedia and similar policies.
pub const DEFAULT_PIXEL_CEILING: u64 = 100_000;

/// Outcome of evaluating an image against the pixel-count ceiling.
///
/// When `needs_downscale` is false, the target dimensions equal the source
/// dimensions unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDecision {
    pub needs_downscale: bool,
    pub target_width: u32,
    pub target_height: u32,
}

/// Evaluate source dimensions against a pixel-count ceiling.
///
/// An image whose pixel count is at or under the ceiling passes untouched
/// (`<=`, not `<` — a product exactly at the ceiling needs no downscale).
/// Otherwise the target width is the largest `w` such that `w * h'` stays
/// under the ceiling with the aspect ratio held fixed, and the height is
/// derived from that width using the same ratio. Both values are truncated,
/// not rounded, so the product lands at or under the ceiling without a
/// re-normalization pass.
///
/// # Examples
/// ```
/// # use pixelcap::imaging::{Dimensions, evaluate};
/// // Exactly at the ceiling: passes unchanged
/// let d = evaluate(Dimensions { width: 500, height: 200 }, 100_000);
/// assert!(!d.needs_downscale);
///
/// // Twice the ceiling: downscaled, product back under the limit
/// let d = evaluate(Dimensions { width: 1000, height: 200 }, 100_000);
/// assert_eq!((d.target_width, d.target_height), (707, 141));
/// ```
pub fn evaluate(dims: Dimensions, ceiling: u64) -> PolicyDecision {
    let Dimensions { width, height } = dims;

    if width as u64 * height as u64 <= ceiling {
        return PolicyDecision {
            needs_downscale: false,
            target_width: width,
            target_height: height,
        };
    }

    let target_width = (ceiling as f64 * width as f64 / height as f64).sqrt() as u32;
    let target_height = (height as f64 * target_width as f64 / width as f64) as u32;

    // 1px floor: extreme aspect ratios can truncate a dimension to zero
    PolicyDecision {
        needs_downscale: true,
        target_width: target_width.max(1),
        target_height: target_height.max(1),
    }
}
