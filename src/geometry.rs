//! Page geometry: paper dimensions, margins, and the printable area.
//!
//! Everything downstream hangs off these numbers. The browser viewport is
//! sized to the full page, the in-page layout script receives the printable
//! area, and the PDF export receives the same margins. Computing them once,
//! in one struct, keeps the three consumers consistent.
//!
//! ## Units
//!
//! Three unit systems meet here: CSS pixels (96 per inch) for everything
//! measured inside the page, inches for the print engine, and millimetres
//! for the human-facing report. All are derived from the inch-denominated
//! paper size and a single margin ratio.

use serde::{Deserialize, Serialize};

// ── Unit conversion ──────────────────────────────────────────────────────

/// CSS reference pixel density.
pub const PX_PER_INCH: f64 = 96.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

// ── Paper dimensions (portrait, inches) ──────────────────────────────────

/// A4 width.
pub const A4_WIDTH_IN: f64 = 8.27;
/// A4 height.
pub const A4_HEIGHT_IN: f64 = 11.69;

/// US Letter width.
pub const LETTER_WIDTH_IN: f64 = 8.5;
/// US Letter height.
pub const LETTER_HEIGHT_IN: f64 = 11.0;

/// US Legal width.
pub const LEGAL_WIDTH_IN: f64 = 8.5;
/// US Legal height.
pub const LEGAL_HEIGHT_IN: f64 = 14.0;

// ── Defaults ─────────────────────────────────────────────────────────────

/// Fraction of each page dimension reserved for the margin on each side.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.1;

/// A diagram whose scaled height reaches this fraction of the printable
/// height qualifies for full-page promotion.
pub const DEFAULT_FULLPAGE_THRESHOLD: f64 = 0.5;

/// Derived page geometry for one render.
///
/// Built by [`PageGeometry::new`] from a paper size and margin ratio; every
/// other value is computed. The margins are uniform per axis: left/right are
/// `margin_ratio × paper width`, top/bottom are `margin_ratio × paper
/// height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Paper width in inches.
    pub paper_width_in: f64,
    /// Paper height in inches.
    pub paper_height_in: f64,
    /// Margin as a fraction of the corresponding page dimension.
    pub margin_ratio: f64,
    /// Width of the printable area in CSS pixels.
    pub printable_width_px: f64,
    /// Height of the printable area in CSS pixels.
    pub printable_height_px: f64,
    /// Left margin in millimetres.
    pub margin_left_mm: f64,
    /// Right margin in millimetres.
    pub margin_right_mm: f64,
    /// Top margin in millimetres.
    pub margin_top_mm: f64,
    /// Bottom margin in millimetres.
    pub margin_bottom_mm: f64,
}

impl PageGeometry {
    /// Compute the geometry for the given paper size and margin ratio.
    pub fn new(paper_width_in: f64, paper_height_in: f64, margin_ratio: f64) -> Self {
        let margin_x_in = paper_width_in * margin_ratio;
        let margin_y_in = paper_height_in * margin_ratio;
        Self {
            paper_width_in,
            paper_height_in,
            margin_ratio,
            printable_width_px: (paper_width_in * PX_PER_INCH)
                - ((margin_x_in + margin_x_in) * PX_PER_INCH),
            printable_height_px: (paper_height_in * PX_PER_INCH)
                - ((margin_y_in + margin_y_in) * PX_PER_INCH),
            margin_left_mm: margin_x_in * MM_PER_INCH,
            margin_right_mm: margin_x_in * MM_PER_INCH,
            margin_top_mm: margin_y_in * MM_PER_INCH,
            margin_bottom_mm: margin_y_in * MM_PER_INCH,
        }
    }

    /// A4 geometry with the given margin ratio.
    pub fn a4(margin_ratio: f64) -> Self {
        Self::new(A4_WIDTH_IN, A4_HEIGHT_IN, margin_ratio)
    }

    /// Left/right margin in inches.
    #[inline]
    pub fn margin_x_in(&self) -> f64 {
        self.paper_width_in * self.margin_ratio
    }

    /// Top/bottom margin in inches.
    #[inline]
    pub fn margin_y_in(&self) -> f64 {
        self.paper_height_in * self.margin_ratio
    }

    /// Browser viewport matching the full page at 96 DPI, as `(width, height)`.
    ///
    /// The viewport covers the whole page, not just the printable area; the
    /// margins are applied by the print engine, not the layout.
    pub fn viewport_px(&self) -> (u32, u32) {
        (
            (self.paper_width_in * PX_PER_INCH).round() as u32,
            (self.paper_height_in * PX_PER_INCH).round() as u32,
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4(DEFAULT_MARGIN_RATIO)
    }
}
