//! Render entry points: the full pipeline behind one function call.
//!
//! ## Why one browser per render?
//!
//! The browser is launched, used for exactly one page, and closed. A failed
//! render must never leave an orphaned Chrome process behind, so the stage
//! sequence runs in a helper and the session is closed on both the success
//! and the error path before the result propagates.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::output::{RenderOutput, RenderReport, RenderStats};
use crate::pipeline::{browser::BrowserSession, export, images, input, layout};
use crate::progress::RenderStage;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Render an HTML file to a PDF, returning the bytes and a report.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `html_path` — path to a local HTML file
/// * `config` — render configuration
///
/// # Errors
/// Returns `Err(RenderError)` when the input is missing or unreadable, no
/// browser can be launched, or any pipeline stage fails. No partial output
/// is produced.
pub async fn render(
    html_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderOutput, RenderError> {
    let total_start = Instant::now();
    let html_path = html_path.as_ref();
    info!("Starting render: {}", html_path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    let input = input::resolve_input(html_path)?;

    // ── Step 2: Compute geometry ─────────────────────────────────────────
    let geometry = config.geometry();
    debug!(
        "Geometry: printable {:.1}x{:.1}px, margins {:.2}/{:.2}mm",
        geometry.printable_width_px,
        geometry.printable_height_px,
        geometry.margin_left_mm,
        geometry.margin_top_mm
    );

    // ── Step 3: Launch browser ───────────────────────────────────────────
    let launch_start = Instant::now();
    stage_start(config, RenderStage::Launch);
    let session = BrowserSession::launch(config, &geometry).await?;
    let launch_ms = launch_start.elapsed().as_millis() as u64;
    stage_complete(config, RenderStage::Launch, launch_ms);

    // ── Steps 4-7 run against the live session; the session is closed on
    // both paths before the outcome propagates. ──────────────────────────
    let outcome = drive_page(&session, &input.url, &geometry, config).await;
    let close_result = session.close().await;

    let (images_report, diagrams, pdf, timings) = outcome?;
    close_result?;

    let stats = RenderStats {
        launch_ms,
        navigate_ms: timings.navigate_ms,
        wait_images_ms: timings.wait_images_ms,
        adjust_ms: timings.adjust_ms,
        export_ms: timings.export_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
        pdf_bytes: pdf.len(),
    };

    info!(
        "Render complete: {} bytes, {} image(s), {} diagram(s), {}ms total",
        stats.pdf_bytes,
        images_report.total,
        diagrams.len(),
        stats.total_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_render_complete(stats.pdf_bytes, stats.total_ms);
    }

    Ok(RenderOutput {
        pdf,
        report: RenderReport {
            geometry,
            images: images_report,
            diagrams,
            stats,
        },
    })
}

/// Render an HTML file and write the PDF directly to `pdf_path`.
///
/// Creates missing parent directories. Uses atomic write (temp file in the
/// target directory + rename) so the target path either holds a complete
/// PDF or stays untouched.
pub async fn render_to_file(
    html_path: impl AsRef<Path>,
    pdf_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderReport, RenderError> {
    let output = render(html_path, config).await?;
    let path = pdf_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RenderError::OutputWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, &output.pdf)
        .await
        .map_err(|e| RenderError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        tokio::fs::remove_file(&tmp_path).await.ok();
        return Err(RenderError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        });
    }

    info!("Wrote {} ({} bytes)", path.display(), output.pdf.len());
    Ok(output.report)
}

/// Render in-memory HTML to a PDF.
///
/// Avoids the need for the caller to create a file: the HTML is staged
/// through a managed [`tempfile`] with an `.html` suffix (the suffix matters
/// — it tells the browser to treat the document as HTML) and cleaned up
/// automatically on return or panic.
pub async fn render_from_string(
    html: &str,
    config: &RenderConfig,
) -> Result<RenderOutput, RenderError> {
    let mut tmp = tempfile::Builder::new()
        .suffix(".html")
        .tempfile()
        .map_err(|e| RenderError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(html.as_bytes())
        .map_err(|e| RenderError::Internal(format!("tempfile write: {e}")))?;
    tmp.flush()
        .map_err(|e| RenderError::Internal(format!("tempfile flush: {e}")))?;
    // `tmp` is dropped (and the file deleted) when `render` returns.
    render(tmp.path(), config).await
}

/// Synchronous wrapper around [`render_to_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn render_sync(
    html_path: impl AsRef<Path>,
    pdf_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderReport, RenderError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| RenderError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(render_to_file(html_path, pdf_path, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Timings for the stages that run against the live page.
#[derive(Default)]
struct PageTimings {
    navigate_ms: u64,
    wait_images_ms: u64,
    adjust_ms: u64,
    export_ms: u64,
}

/// Navigate, wait for images, adjust diagrams, and export — everything that
/// needs the session. Split out so [`render`] can close the session exactly
/// once regardless of where this fails.
async fn drive_page(
    session: &BrowserSession,
    url: &url::Url,
    geometry: &PageGeometry,
    config: &RenderConfig,
) -> Result<
    (
        crate::output::ImageWaitReport,
        Vec<crate::output::DiagramAdjustment>,
        Vec<u8>,
        PageTimings,
    ),
    RenderError,
> {
    let mut timings = PageTimings::default();

    // ── Step 4: Navigate (with print media emulation) ────────────────────
    let start = Instant::now();
    stage_start(config, RenderStage::Navigate);
    let page = session.open(url).await?;
    timings.navigate_ms = start.elapsed().as_millis() as u64;
    stage_complete(config, RenderStage::Navigate, timings.navigate_ms);

    // ── Step 5: Wait for images ──────────────────────────────────────────
    let start = Instant::now();
    stage_start(config, RenderStage::WaitImages);
    let images_report = images::wait_for_images(&page).await?;
    timings.wait_images_ms = start.elapsed().as_millis() as u64;
    stage_complete(config, RenderStage::WaitImages, timings.wait_images_ms);

    // ── Step 6: Adjust diagram layout ────────────────────────────────────
    let start = Instant::now();
    stage_start(config, RenderStage::AdjustDiagrams);
    let diagrams = layout::adjust_diagrams(&page, geometry, config).await?;
    timings.adjust_ms = start.elapsed().as_millis() as u64;
    stage_complete(config, RenderStage::AdjustDiagrams, timings.adjust_ms);

    // ── Step 7: Export PDF ───────────────────────────────────────────────
    let start = Instant::now();
    stage_start(config, RenderStage::ExportPdf);
    let params = export::pdf_params(geometry, config);
    let pdf = export::export_pdf(&page, params).await?;
    timings.export_ms = start.elapsed().as_millis() as u64;
    stage_complete(config, RenderStage::ExportPdf, timings.export_ms);

    Ok((images_report, diagrams, pdf, timings))
}

fn stage_start(config: &RenderConfig, stage: RenderStage) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(stage);
    }
}

fn stage_complete(config: &RenderConfig, stage: RenderStage, elapsed_ms: u64) {
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(stage, elapsed_ms);
    }
}
