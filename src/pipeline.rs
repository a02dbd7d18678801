//! Image pipeline driver.
//!
//! Sequences identify → policy evaluation → conditional resized decode →
//! render → conditional export. One [`Session`] owns the injected
//! collaborators (decode backend, render surface, export sink) plus the
//! status board and error log, and exposes the event-level entry points:
//!
//! - [`Session::select`] — a fresh user selection; auto-exports on success
//! - [`Session::restore`] — a selection restored at startup; no auto-export
//! - [`Session::export`] — the manual export action
//! - [`Session::probe_export`] — early capability check
//!
//! ## Failure contract
//!
//! Every failure is appended to the error log, then re-signaled to the
//! caller. The invocation aborts where it failed: status text published by
//! earlier stages stays, and the surface and export-enabled flag keep
//! whatever state the last completed stage left them in. There is no
//! rollback and no retry; the session remains usable for the next input.

use crate::config::ToolConfig;
use crate::errorlog::ErrorLog;
use crate::export::{ExportError, ExportSink};
use crate::imaging::{
    BackendError, DEFAULT_PIXEL_CEILING, DecodeBackend, DecodeParams, Dimensions, ResizeQuality,
    evaluate,
};
use crate::naming;
use crate::status::{self, StatusBoard};
use crate::surface::RenderSurface;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("image decode failed: {0}")]
    Decode(#[from] BackendError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("export is not available: no downscaled image to save")]
    ExportUnavailable,
}

/// Whether a successful downscale immediately triggers export.
///
/// `Auto` is the fresh-selection flow; `Manual` is used when re-running a
/// selection the user never acted on (startup restore).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Auto,
    Manual,
}

/// Result of a completed pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Source already meets the policy; surface cleared, export disabled.
    WithinCeiling { source: Dimensions },
    /// Source was downscaled and rendered.
    Downscaled {
        source: Dimensions,
        rendered: Dimensions,
        /// Delivered location when auto-export ran.
        exported: Option<PathBuf>,
    },
}

/// One interactive session: collaborators, display state, and the currently
/// selected file.
///
/// Entry points take `&mut self`, so invocations are strictly sequential —
/// a later selection cannot race an earlier one for the surface or status.
pub struct Session<B, S, E> {
    backend: B,
    surface: S,
    exporter: E,
    status: StatusBoard,
    errors: ErrorLog,
    ceiling: u64,
    quality: ResizeQuality,
    export_enabled: bool,
    selected: Option<PathBuf>,
}

impl<B, S, E> Session<B, S, E>
where
    B: DecodeBackend,
    S: RenderSurface,
    E: ExportSink,
{
    /// Session with the stock ceiling and high-quality resampling.
    pub fn new(backend: B, surface: S, exporter: E) -> Self {
        Self {
            backend,
            surface,
            exporter,
            status: StatusBoard::new(),
            errors: ErrorLog::new(),
            ceiling: DEFAULT_PIXEL_CEILING,
            quality: ResizeQuality::High,
            export_enabled: false,
            selected: None,
        }
    }

    pub fn with_config(backend: B, surface: S, exporter: E, config: &ToolConfig) -> Self {
        let mut session = Self::new(backend, surface, exporter);
        session.ceiling = config.policy.pixel_ceiling;
        session.quality = config.resize.quality;
        session
    }

    /// Handle a fresh file selection. Runs the pipeline and, if a downscale
    /// was produced, exports it immediately.
    pub fn select(&mut self, path: &Path) -> Result<Outcome, PipelineError> {
        self.run(path, ExportMode::Auto)
    }

    /// Handle a selection already present at startup (form-restore). Runs
    /// the pipeline without auto-export, leaving the export action to the
    /// user.
    pub fn restore(&mut self, path: &Path) -> Result<Outcome, PipelineError> {
        self.run(path, ExportMode::Manual)
    }

    /// Manual export of the current surface content.
    pub fn export(&mut self) -> Result<PathBuf, PipelineError> {
        let result = if self.export_enabled {
            self.export_current()
        } else {
            Err(PipelineError::ExportUnavailable)
        };
        result.map_err(|e| self.log(e))
    }

    /// Exercise the export capability without running a pipeline, so
    /// permission failures show up in the error log early.
    pub fn probe_export(&mut self) -> Result<(), PipelineError> {
        self.exporter
            .probe()
            .map_err(|e| self.log(PipelineError::Export(e)))
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn export_enabled(&self) -> bool {
        self.export_enabled
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Record a failure in the error log, then hand it back for re-signaling.
    fn log(&mut self, error: PipelineError) -> PipelineError {
        self.errors.record(&error);
        error
    }

    fn run(&mut self, source: &Path, mode: ExportMode) -> Result<Outcome, PipelineError> {
        self.selected = Some(source.to_path_buf());
        self.run_stages(source, mode).map_err(|e| self.log(e))
    }

    /// The per-invocation stage sequence. Early returns make the
    /// abort-on-first-failure contract explicit: nothing below a failed
    /// stage runs, nothing above it is undone.
    fn run_stages(&mut self, source: &Path, mode: ExportMode) -> Result<Outcome, PipelineError> {
        let dims = self.backend.identify(source)?;
        self.status.set_source(status::format_source_status(dims));

        let decision = evaluate(dims, self.ceiling);
        if !decision.needs_downscale {
            self.surface.clear();
            self.export_enabled = false;
            self.status.set_destination(status::NO_DOWNSCALE_STATUS);
            return Ok(Outcome::WithinCeiling { source: dims });
        }

        let bitmap = self.backend.decode(&DecodeParams::resized(
            source,
            decision.target_width,
            decision.target_height,
            self.quality,
        ))?;
        let rendered = bitmap.dimensions();
        self.status
            .set_destination(status::format_destination_status(rendered));
        self.surface.draw(&bitmap);
        self.export_enabled = true;

        let exported = match mode {
            ExportMode::Auto => Some(self.export_current()?),
            ExportMode::Manual => None,
        };

        Ok(Outcome::Downscaled {
            source: dims,
            rendered,
            exported,
        })
    }

    fn export_current(&mut self) -> Result<PathBuf, PipelineError> {
        let content = self
            .surface
            .content()
            .ok_or(PipelineError::ExportUnavailable)?;
        let original = self
            .selected
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(PipelineError::ExportUnavailable)?;
        let filename = naming::export_filename(&original);
        Ok(self.exporter.export(content, &filename)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::RecordingExporter;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::surface::PixelSurface;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    fn session_with(
        identify: Vec<Dimensions>,
    ) -> Session<MockBackend, PixelSurface, RecordingExporter> {
        Session::new(
            MockBackend::with_dimensions(identify),
            PixelSurface::new(),
            RecordingExporter::default(),
        )
    }

    #[test]
    fn within_ceiling_skips_decode_and_export() {
        // 500*200 = 100_000, exactly at the ceiling
        let mut session = session_with(vec![dims(500, 200)]);

        let outcome = session.select(Path::new("/photos/small.jpg")).unwrap();
        assert_eq!(
            outcome,
            Outcome::WithinCeiling {
                source: dims(500, 200)
            }
        );

        assert!(!session.export_enabled());
        assert!(session.surface().content().is_none());
        assert_eq!(
            session.status().source(),
            Some("Source image resolution: 500x200")
        );
        assert_eq!(session.status().destination(), Some(status::NO_DOWNSCALE_STATUS));
        assert!(session.errors().is_empty());

        // Auto-export mode never reached the exporter, and no pixel decode ran
        assert!(session.exporter().exports.is_empty());
        let ops = session.backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
    }

    #[test]
    fn oversized_select_downscales_and_auto_exports() {
        let mut session = session_with(vec![dims(1000, 200)]);

        let outcome = session.select(Path::new("/photos/big.jpg")).unwrap();
        assert_eq!(
            outcome,
            Outcome::Downscaled {
                source: dims(1000, 200),
                rendered: dims(707, 141),
                exported: Some(PathBuf::from("Downscaled - big.png")),
            }
        );

        assert!(session.export_enabled());
        let content = session.surface().content().unwrap();
        assert_eq!((content.width(), content.height()), (707, 141));
        assert_eq!(
            session.status().destination(),
            Some("Downscaled image resolution: 707x141")
        );
        assert_eq!(
            session.exporter().exports,
            vec![("Downscaled - big.png".to_string(), 707, 141)]
        );

        // Decode was requested at the policy's target dimensions, high quality
        let ops = session.backend.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::Decode {
                resize: Some((707, 141)),
                quality: Some(ResizeQuality::High),
                ..
            }
        ));
    }

    #[test]
    fn restore_renders_without_exporting() {
        let mut session = session_with(vec![dims(1000, 200)]);

        let outcome = session.restore(Path::new("/photos/big.jpg")).unwrap();
        assert!(matches!(
            outcome,
            Outcome::Downscaled { exported: None, .. }
        ));

        assert!(session.export_enabled());
        assert!(session.exporter().exports.is_empty());
    }

    #[test]
    fn manual_export_after_restore() {
        let mut session = session_with(vec![dims(1000, 200)]);
        session.restore(Path::new("/photos/big.jpg")).unwrap();

        let path = session.export().unwrap();
        assert_eq!(path, PathBuf::from("Downscaled - big.png"));
        assert_eq!(session.exporter().exports.len(), 1);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn export_while_disabled_fails_and_logs() {
        let mut session = session_with(vec![dims(100, 100)]);
        session.select(Path::new("/photos/small.jpg")).unwrap();

        let result = session.export();
        assert!(matches!(result, Err(PipelineError::ExportUnavailable)));
        assert_eq!(session.errors().entry_count(), 1);
        assert!(session.exporter().exports.is_empty());
    }

    #[test]
    fn identify_failure_logs_and_leaves_state_untouched() {
        // First run succeeds and enables export
        let mut session = session_with(vec![dims(1000, 200)]);
        session.select(Path::new("/photos/big.jpg")).unwrap();
        assert!(session.export_enabled());

        // Second run fails at identify: no stage completed, so surface,
        // export flag, and status all keep the prior run's state
        session.backend.fail_identify.set(true);
        let result = session.select(Path::new("/photos/broken.jpg"));
        assert!(result.is_err());

        assert!(session.errors().text().contains("mock identify failure"));
        assert!(session.export_enabled());
        let content = session.surface().content().unwrap();
        assert_eq!((content.width(), content.height()), (707, 141));
        assert_eq!(
            session.status().source(),
            Some("Source image resolution: 1000x200")
        );
    }

    #[test]
    fn resize_decode_failure_keeps_source_status() {
        let mut session = session_with(vec![dims(1000, 200)]);
        session.backend.fail_decode.set(true);

        let result = session.select(Path::new("/photos/big.jpg"));
        assert!(result.is_err());

        // Identify completed, so the source line was published before the abort
        assert_eq!(
            session.status().source(),
            Some("Source image resolution: 1000x200")
        );
        assert!(session.status().destination().is_none());
        assert!(session.surface().content().is_none());
        assert!(!session.export_enabled());
        assert_eq!(session.errors().entry_count(), 1);
    }

    #[test]
    fn auto_export_failure_logs_but_keeps_render() {
        let mut session = Session::new(
            MockBackend::with_dimensions(vec![dims(1000, 200)]),
            PixelSurface::new(),
            RecordingExporter {
                fail_export: true,
                ..RecordingExporter::default()
            },
        );

        let result = session.select(Path::new("/photos/big.jpg"));
        assert!(matches!(result, Err(PipelineError::Export(_))));

        // Render completed before the export stage failed
        assert!(session.surface().content().is_some());
        assert!(session.export_enabled());
        assert!(session.errors().text().contains("mock export denied"));
    }

    #[test]
    fn probe_failure_is_logged_and_resignaled() {
        let mut session = Session::new(
            MockBackend::new(),
            PixelSurface::new(),
            RecordingExporter {
                fail_probe: true,
                ..RecordingExporter::default()
            },
        );

        assert!(session.probe_export().is_err());
        assert_eq!(session.errors().entry_count(), 1);
        assert!(session.errors().text().contains("mock export denied"));
    }

    #[test]
    fn error_log_accumulates_across_runs() {
        let mut session = session_with(vec![dims(1000, 200)]);

        session.backend.fail_identify.set(true);
        assert!(session.select(Path::new("/a.jpg")).is_err());
        assert!(session.select(Path::new("/b.jpg")).is_err());

        // A later successful run does not clear the log
        session.backend.fail_identify.set(false);
        session.select(Path::new("/photos/big.jpg")).unwrap();

        assert_eq!(session.errors().entry_count(), 2);
        assert!(session.errors().text().contains("---"));
    }

    #[test]
    fn reselection_after_pass_disables_export_again() {
        // Oversized first, then a compliant image: the stale downscale must
        // not remain exportable
        let mut session = session_with(vec![dims(400, 200), dims(1000, 200)]);

        session.select(Path::new("/photos/big.jpg")).unwrap();
        assert!(session.export_enabled());

        session.select(Path::new("/photos/small.jpg")).unwrap();
        assert!(!session.export_enabled());
        assert!(session.surface().content().is_none());
        assert!(matches!(
            session.export(),
            Err(PipelineError::ExportUnavailable)
        ));
    }

    #[test]
    fn configured_ceiling_and_quality_apply() {
        let config: ToolConfig =
            toml::from_str("[policy]\npixel_ceiling = 50000\n[resize]\nquality = \"medium\"\n")
                .unwrap();
        // 300*200 = 60_000 exceeds the configured 50_000 ceiling
        let mut session = Session::with_config(
            MockBackend::with_dimensions(vec![dims(300, 200)]),
            PixelSurface::new(),
            RecordingExporter::default(),
            &config,
        );

        let outcome = session.select(Path::new("/photos/medium.jpg")).unwrap();
        assert!(matches!(outcome, Outcome::Downscaled { .. }));

        let ops = session.backend.get_operations();
        assert!(matches!(
            &ops[1],
            RecordedOp::Decode {
                quality: Some(ResizeQuality::Medium),
                ..
            }
        ));
    }
}
