//! Pipeline stages for HTML-to-PDF rendering.
//!
//! Each submodule implements exactly one step. Keeping stages separate makes
//! each independently testable and lets us time and report them
//! individually without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ browser ──▶ images ──▶ layout ──▶ export
//! (path)    (launch,    (in-page   (diagram   (print
//!            navigate)   wait)      pass)      to PDF)
//! ```
//!
//! 1. [`input`]   — validate the HTML path and build its file:// URL
//! 2. [`browser`] — own the headless-Chromium session: launch, navigate with
//!    print-media emulation, tear down
//! 3. [`images`]  — run the in-page wait until every image has settled
//! 4. [`layout`]  — run the diagram full-page layout pass
//! 5. [`export`]  — build the print parameters and export the PDF

pub mod browser;
pub mod export;
pub mod images;
pub mod input;
pub mod layout;
