//! Export filename derivation.
//!
//! Exported files are named `Downscaled - <base>.png`, where `<base>` is the
//! original filename with a trailing image extension stripped. Only a final
//! `.` followed by 3–4 word characters counts as an extension — `photo.jpeg`
//! loses its suffix, `archive.gz` and `no-extension` pass through whole.

/// Prefix prepended to every exported filename.
pub const EXPORT_PREFIX: &str = "Downscaled - ";

/// Strip a trailing `.<3-4 word chars>` extension, if present.
pub fn strip_extension(name: &str) -> &str {
    if let Some(dot) = name.rfind('.') {
        let ext = &name[dot + 1..];
        let word_chars = ext
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if word_chars && (3..=4).contains(&ext.len()) {
            return &name[..dot];
        }
    }
    name
}

/// Derive the export filename from the original file name.
pub fn export_filename(original: &str) -> String {
    format!("{EXPORT_PREFIX}{}.png", strip_extension(original))
}
