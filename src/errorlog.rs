//! Append-only error log.
//!
//! Every failure is recorded here before being re-signaled to the caller —
//! the log never swallows and is never cleared within a session, so earlier
//! failures stay visible after a later successful run. Entries are separated
//! by `---` lines, matching the accumulating display the log feeds.

use std::error::Error;

/// Render an error as its display text plus its full source chain.
///
/// The chain is the closest analog to a stack trace a `std::error::Error`
/// carries: each `caused by:` line is one level of `source()`.
pub fn render_error(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Accumulating, never-cleared error display.
#[derive(Debug, Default)]
pub struct ErrorLog {
    text: String,
    entries: usize,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error to the log. Does not consume or suppress it — the
    /// caller re-signals the error after recording.
    pub fn record(&mut self, error: &(dyn Error + 'static)) {
        if !self.text.is_empty() {
            self.text.push_str("\n---\n");
        }
        self.text.push_str(&render_error(error));
        self.entries += 1;
    }

    /// Full log text, entries separated by `---` lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}
