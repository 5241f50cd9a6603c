//! # pagepress
//!
//! Render HTML documents to paginated A4 PDFs with diagram-aware layout.
//!
//! ## Why this crate?
//!
//! Direct HTML-to-PDF converters typeset their own layout engine and get
//! real-world CSS subtly wrong. Instead this crate drives a headless
//! Chromium as the rendering engine: the document is laid out exactly as a
//! browser would print it, embedded diagram images are promoted to
//! full-page layout inside the live DOM, and the browser's own print
//! pipeline produces the PDF with computed margins and a page-number footer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML file
//!  │
//!  ├─ 1. Input    validate the path, build the file:// URL
//!  ├─ 2. Browser  launch headless Chromium, navigate, emulate print media
//!  ├─ 3. Images   wait in-page until every <img> has settled
//!  ├─ 4. Layout   full-page promotion pass over diagram-marked images
//!  ├─ 5. Export   print-to-PDF with A4 geometry and page-number footer
//!  └─ 6. Output   PDF bytes + structured RenderReport
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagepress::{render_to_file, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Chrome/Chromium auto-detected; pin with .browser_executable(...)
//!     let config = RenderConfig::default();
//!     let report = render_to_file("document.html", "document.pdf", &config).await?;
//!     eprintln!(
//!         "{} diagram(s) adjusted, {} bytes in {}ms",
//!         report.diagrams.len(),
//!         report.stats.pdf_bytes,
//!         report.stats.total_ms
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pagepress` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pagepress = { version = "0.1", default-features = false }
//! ```
//!
//! ## Markup contract
//!
//! The input HTML may mark images for special treatment:
//!
//! | Class | Meaning |
//! |-------|---------|
//! | `mermaid-diagram`  | the `<img>` is a diagram; eligible for full-page layout |
//! | `mermaid-fullpage` | force full-page layout for this diagram |
//! | `mermaid-wrap`     | a container wrapping a diagram; resized along with it |
//!
//! All three class names are configurable via [`RenderConfig`]. Note that
//! in the current behaviour every diagram-marked image receives full-page
//! layout regardless of size or marker class; the per-diagram
//! [`DiagramAdjustment`] records what the size-based decision would have
//! been.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod scripts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PaperSize, RenderConfig, RenderConfigBuilder};
pub use error::RenderError;
pub use geometry::PageGeometry;
pub use output::{DiagramAdjustment, ImageWaitReport, RenderOutput, RenderReport, RenderStats};
pub use progress::{NoopProgressCallback, ProgressCallback, RenderProgressCallback, RenderStage};
pub use render::{render, render_from_string, render_sync, render_to_file};
