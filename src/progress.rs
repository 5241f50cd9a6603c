//! Progress-callback trait for per-stage render events.
//!
//! Inject an [`Arc<dyn RenderProgressCallback>`] via
//! [`crate::config::RenderConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline moves through its stages.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log, or a channel — without
//! the library knowing anything about how the host application communicates.
//! The trait is `Send + Sync` so a single callback can be shared across
//! renders running on different tasks.

use std::sync::Arc;

/// The stages of one render, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStage {
    /// Launching the headless browser.
    Launch,
    /// Navigating to the file:// URL and waiting for it to settle.
    Navigate,
    /// Waiting for every image in the document to finish loading.
    WaitImages,
    /// Running the diagram layout pass.
    AdjustDiagrams,
    /// Exporting the page to PDF.
    ExportPdf,
}

impl RenderStage {
    /// All stages, in execution order.
    pub const ALL: [RenderStage; 5] = [
        RenderStage::Launch,
        RenderStage::Navigate,
        RenderStage::WaitImages,
        RenderStage::AdjustDiagrams,
        RenderStage::ExportPdf,
    ];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RenderStage::Launch => "launch browser",
            RenderStage::Navigate => "load document",
            RenderStage::WaitImages => "wait for images",
            RenderStage::AdjustDiagrams => "adjust diagrams",
            RenderStage::ExportPdf => "export PDF",
        }
    }
}

/// Called by the render pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Arguments are owned or `Copy` so implementations
/// can move them into spawned tasks freely.
pub trait RenderProgressCallback: Send + Sync {
    /// Called just before a stage begins.
    fn on_stage_start(&self, stage: RenderStage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully.
    fn on_stage_complete(&self, stage: RenderStage, elapsed_ms: u64) {
        let _ = (stage, elapsed_ms);
    }

    /// Called once after the PDF has been produced.
    fn on_render_complete(&self, pdf_bytes: usize, total_ms: u64) {
        let _ = (pdf_bytes, total_ms);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl RenderProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::RenderConfig`].
pub type ProgressCallback = Arc<dyn RenderProgressCallback>;
