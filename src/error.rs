//! Error types for the pagepress library.
//!
//! Every failure here is fatal for the render in progress: there is exactly
//! one page to produce, so there is no partial-success story and no retry
//! layer. The variants exist to tell the caller *which* precondition or
//! stage failed, so a CLI can print an actionable message and tests can
//! assert on the failure kind rather than string-matching.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pagepress library.
#[derive(Debug, Error)]
pub enum RenderError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input HTML file was not found at the given path.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The input path exists but is a directory or other non-file entry.
    #[error("Input is not a regular file: '{path}'")]
    NotAFile { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The path could not be expressed as a file:// URL (relative path that
    /// failed to canonicalise, or a non-absolute path on this platform).
    #[error("Cannot build a file:// URL for '{path}'")]
    InvalidFileUrl { path: PathBuf },

    // ── Browser errors ────────────────────────────────────────────────────
    /// No Chromium-based browser could be located.
    #[error(
        "No usable Chrome/Chromium browser found: {0}\n\n\
A Chromium-based browser is required as the rendering engine.\n\
  • Install Chrome or Chromium via your package manager.\n\
  • Or pass the executable path as the third argument: pagepress in.html out.pdf /usr/bin/chromium\n\
  • Or set PAGEPRESS_BROWSER=/path/to/chrome.\n"
    )]
    BrowserNotFound(String),

    /// A browser executable was found but the process failed to start or
    /// the DevTools connection could not be established.
    #[error("Failed to launch browser: {detail}")]
    BrowserLaunch { detail: String },

    /// Navigation to the file:// URL failed or timed out.
    #[error("Failed to load '{url}': {detail}")]
    Navigation { url: String, detail: String },

    /// An in-page script failed to run or returned an unreadable value.
    #[error("In-page script failed during {context}: {detail}")]
    Script { context: &'static str, detail: String },

    /// The print-to-PDF call itself failed.
    #[error("PDF export failed: {detail}")]
    PdfExport { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
