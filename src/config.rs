//! Configuration types for HTML-to-PDF rendering.
//!
//! All render behaviour is controlled through [`RenderConfig`], built via its
//! [`RenderConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across threads and to diff two runs to understand why
//! their outputs differ.
//!
//! # Design choice: builder over constructor
//! A dozen-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::RenderError;
use crate::geometry::{
    PageGeometry, A4_HEIGHT_IN, A4_WIDTH_IN, DEFAULT_FULLPAGE_THRESHOLD, DEFAULT_MARGIN_RATIO,
    LEGAL_HEIGHT_IN, LEGAL_WIDTH_IN, LETTER_HEIGHT_IN, LETTER_WIDTH_IN,
};
use crate::progress::RenderProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Paper size of the exported PDF (portrait orientation).
///
/// Only A4 matches the classic contract; the others follow the same
/// geometry rule (margins as a fixed fraction of each page dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// ISO A4, 8.27in × 11.69in. (default)
    #[default]
    A4,
    /// US Letter, 8.5in × 11in.
    Letter,
    /// US Legal, 8.5in × 14in.
    Legal,
}

impl PaperSize {
    /// Paper dimensions in inches as `(width, height)`.
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (A4_WIDTH_IN, A4_HEIGHT_IN),
            PaperSize::Letter => (LETTER_WIDTH_IN, LETTER_HEIGHT_IN),
            PaperSize::Legal => (LEGAL_WIDTH_IN, LEGAL_HEIGHT_IN),
        }
    }
}

/// Configuration for one HTML-to-PDF render.
///
/// Built via [`RenderConfig::builder()`] or using
/// [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use pagepress::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .margin_ratio(0.1)
///     .request_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RenderConfig {
    /// Paper size of the exported PDF. Default: [`PaperSize::A4`].
    pub paper: PaperSize,

    /// Margin as a fraction of each page dimension, applied per side.
    /// Range: 0.0–0.45. Default: 0.1.
    ///
    /// 0.1 means left/right margins are each 10% of the paper width and
    /// top/bottom margins each 10% of the paper height. Values above 0.45
    /// would leave a printable area thinner than the margins themselves,
    /// so the builder clamps there.
    pub margin_ratio: f64,

    /// Fraction of the printable height at which a scaled diagram qualifies
    /// for full-page promotion. Range: (0, 1]. Default: 0.5.
    ///
    /// The promotion decision is currently forced on for every diagram (see
    /// [`crate::scripts`]); the threshold still drives the
    /// `exceeds_threshold` field of the per-diagram report.
    pub fullpage_threshold: f64,

    /// Pin the browser binary used for rendering. When `None`, a Chrome or
    /// Chromium executable is auto-detected from well-known locations.
    pub browser_executable: Option<PathBuf>,

    /// Per-CDP-request timeout in seconds. Default: 30.
    ///
    /// This bounds each individual DevTools call (navigation, evaluation,
    /// PDF export), not the whole render.
    pub request_timeout_secs: u64,

    /// Print background colours and images. Default: true.
    pub print_background: bool,

    /// Show the "current/total" page-number footer. Default: true.
    ///
    /// When disabled, the header/footer band is suppressed entirely.
    pub page_numbers: bool,

    /// Pass --no-sandbox to the browser. Default: false.
    ///
    /// Required when running Chrome as root inside containers that lack
    /// user namespaces.
    pub no_sandbox: bool,

    /// Class marking an `<img>` as a diagram. Default: "mermaid-diagram".
    pub diagram_class: String,

    /// Class forcing a diagram to full-page layout. Default: "mermaid-fullpage".
    ///
    /// Also used as the base of the derived wrapper class: a resized wrapper
    /// gains `<fullpage_class>-wrap`.
    pub fullpage_class: String,

    /// Class marking a diagram's wrapping container. Default: "mermaid-wrap".
    pub wrapper_class: String,

    /// Optional progress callback receiving per-stage events.
    pub progress_callback: Option<Arc<dyn RenderProgressCallback>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margin_ratio: DEFAULT_MARGIN_RATIO,
            fullpage_threshold: DEFAULT_FULLPAGE_THRESHOLD,
            browser_executable: None,
            request_timeout_secs: 30,
            print_background: true,
            page_numbers: true,
            no_sandbox: false,
            diagram_class: "mermaid-diagram".to_string(),
            fullpage_class: "mermaid-fullpage".to_string(),
            wrapper_class: "mermaid-wrap".to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("paper", &self.paper)
            .field("margin_ratio", &self.margin_ratio)
            .field("fullpage_threshold", &self.fullpage_threshold)
            .field("browser_executable", &self.browser_executable)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("print_background", &self.print_background)
            .field("page_numbers", &self.page_numbers)
            .field("no_sandbox", &self.no_sandbox)
            .field("diagram_class", &self.diagram_class)
            .field("fullpage_class", &self.fullpage_class)
            .field("wrapper_class", &self.wrapper_class)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn RenderProgressCallback>"),
            )
            .finish()
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }

    /// Compute the page geometry this configuration produces.
    pub fn geometry(&self) -> PageGeometry {
        let (w, h) = self.paper.dimensions_in();
        PageGeometry::new(w, h, self.margin_ratio)
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn paper(mut self, paper: PaperSize) -> Self {
        self.config.paper = paper;
        self
    }

    pub fn margin_ratio(mut self, ratio: f64) -> Self {
        self.config.margin_ratio = ratio.clamp(0.0, 0.45);
        self
    }

    pub fn fullpage_threshold(mut self, t: f64) -> Self {
        self.config.fullpage_threshold = t;
        self
    }

    pub fn browser_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.browser_executable = Some(path.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn print_background(mut self, v: bool) -> Self {
        self.config.print_background = v;
        self
    }

    pub fn page_numbers(mut self, v: bool) -> Self {
        self.config.page_numbers = v;
        self
    }

    pub fn no_sandbox(mut self, v: bool) -> Self {
        self.config.no_sandbox = v;
        self
    }

    pub fn diagram_class(mut self, class: impl Into<String>) -> Self {
        self.config.diagram_class = class.into();
        self
    }

    pub fn fullpage_class(mut self, class: impl Into<String>) -> Self {
        self.config.fullpage_class = class.into();
        self
    }

    pub fn wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.config.wrapper_class = class.into();
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn RenderProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, RenderError> {
        let c = &self.config;
        if !(c.fullpage_threshold > 0.0 && c.fullpage_threshold <= 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "fullpage_threshold must be in (0, 1], got {}",
                c.fullpage_threshold
            )));
        }
        // Class names are interpolated into in-page scripts and CSS selectors,
        // so anything outside the safe character set is rejected outright.
        for (name, value) in [
            ("diagram_class", &c.diagram_class),
            ("fullpage_class", &c.fullpage_class),
            ("wrapper_class", &c.wrapper_class),
        ] {
            if !is_valid_class(value) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must match [A-Za-z0-9_-]+, got '{value}'"
                )));
            }
        }
        Ok(self.config)
    }
}

fn is_valid_class(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
