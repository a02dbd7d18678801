//! # pixelcap
//!
//! Downscale images to a fixed pixel-count ceiling, preserving aspect ratio.
//! Select an image, and if its pixel count (width × height) exceeds the
//! configured limit it is proportionally reduced and offered for export as
//! `Downscaled - <name>.png`. Images already at or under the limit pass
//! untouched. The stock ceiling of 100,000 pixels matches the resolution
//! guideline for non-free images on wikis.
//!
//! # Architecture: Policy Core + Injected Collaborators
//!
//! The crate is split along one seam: a pure policy core, and a driver that
//! sequences I/O through injected collaborators.
//!
//! ```text
//! select/restore → identify → evaluate ─┬─ pass:      clear surface, disable export
//!                                       └─ downscale: resized decode → draw → enable
//!                                                     export → (auto) export
//! ```
//!
//! This separation exists for two reasons:
//!
//! - **Testability**: the policy math and the driver's stage sequencing are
//!   exercised with a recording mock backend and an in-memory surface — no
//!   real decoding, no filesystem.
//! - **Embeddability**: the surface, export sink, and status/error displays
//!   are traits or plain in-memory types, so a UI shell can wire them to
//!   whatever it renders. Production implementations for the filesystem case
//!   ship in-crate.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pure policy math, decode backend trait, `image`-crate backend |
//! | [`pipeline`] | The driver — stage sequencing, session state, entry points |
//! | [`surface`] | Render surface trait + in-memory implementation |
//! | [`export`] | PNG export sink trait + directory-backed implementation |
//! | [`status`] | Status line formatting and the two-slot display |
//! | [`errorlog`] | Append-only, never-cleared error log |
//! | [`naming`] | `Downscaled - <base>.png` filename derivation |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//!
//! # Design Decisions
//!
//! ## Identify Before Decode
//!
//! The pipeline reads dimensions from the file header first and only decodes
//! pixels when a downscale is actually needed, at the target size directly.
//! A compliant image costs a header read; an oversized one costs exactly one
//! full decode.
//!
//! ## Truncate, Don't Round
//!
//! Target dimensions are computed with two truncations — width from the
//! ceiling, height from that width — so the product lands at or under the
//! ceiling without a re-normalization pass. Rounding either dimension up
//! could overshoot the limit by a whole row or column of pixels.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling, and PNG encoding all come from the `image` crate —
//! pure Rust, statically linked, no system dependencies. JPEG, PNG, TIFF,
//! and WebP inputs are supported out of the box.
//!
//! ## Errors Are Displayed, Never Swallowed
//!
//! Every failure is appended to a session-lifetime error log *and*
//! re-signaled to the caller. The log is never cleared, so a user can see
//! what went wrong three selections ago. A failed invocation leaves
//! everything the completed stages produced in place — no rollback, no
//! partial cleanup — and the session stays usable for the next input.

pub mod config;
pub mod errorlog;
pub mod export;
pub mod imaging;
pub mod naming;
pub mod pipeline;
pub mod status;
pub mod surface;
