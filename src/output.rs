//! Typed results of a render: PDF bytes plus a structured report.
//!
//! The report exists because the interesting work happens inside the
//! browser, out of sight. Surfacing the image-wait counts and the
//! per-diagram layout decisions lets callers (and the CLI's `--json` mode)
//! verify what the in-page scripts actually did without re-opening the PDF.

use crate::geometry::PageGeometry;
use serde::{Deserialize, Serialize};

/// Outcome of the in-page image wait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageWaitReport {
    /// Number of `<img>` elements in the document.
    pub total: usize,
    /// How many of them were still loading and had to be awaited.
    pub awaited: usize,
}

/// One record per diagram-marked image, as computed by the layout script.
///
/// `promoted` is what actually happened; `forced_by_class` and
/// `exceeds_threshold` are the inputs to the decision that is currently
/// overridden (every diagram is promoted regardless).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramAdjustment {
    /// Intrinsic image width in pixels (0 if the image failed to load).
    pub natural_width: u32,
    /// Intrinsic image height in pixels.
    pub natural_height: u32,
    /// Scale factor mapping the natural width onto the printable width.
    pub scale: f64,
    /// Natural height × scale, in pixels.
    pub scaled_height: f64,
    /// The image carried the explicit full-page marker class.
    pub forced_by_class: bool,
    /// The scaled height reached the threshold fraction of the printable height.
    pub exceeds_threshold: bool,
    /// A marked wrapper ancestor was found and resized.
    pub has_wrapper: bool,
    /// Full-page layout was applied.
    pub promoted: bool,
}

/// Per-stage wall-clock timings and output size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Browser launch time in milliseconds.
    pub launch_ms: u64,
    /// Navigation (including the network-idle wait) in milliseconds.
    pub navigate_ms: u64,
    /// In-page image wait in milliseconds.
    pub wait_images_ms: u64,
    /// Diagram layout pass in milliseconds.
    pub adjust_ms: u64,
    /// PDF export in milliseconds.
    pub export_ms: u64,
    /// End-to-end duration in milliseconds.
    pub total_ms: u64,
    /// Size of the exported PDF in bytes.
    pub pdf_bytes: usize,
}

/// Everything a render produced besides the PDF bytes themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    /// The geometry the render was computed with.
    pub geometry: PageGeometry,
    /// Image-wait outcome.
    pub images: ImageWaitReport,
    /// One entry per diagram-marked image, in document order.
    pub diagrams: Vec<DiagramAdjustment>,
    /// Stage timings and output size.
    pub stats: RenderStats,
}

/// Result of [`crate::render`]: the PDF plus its report.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The exported PDF document.
    pub pdf: Vec<u8>,
    /// Structured account of what the render did.
    pub report: RenderReport,
}
