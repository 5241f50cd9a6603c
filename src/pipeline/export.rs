//! PDF export: build the print parameters and run the print-to-PDF call.
//!
//! CDP expresses paper size and margins in inches; the millimetre values in
//! [`PageGeometry`] are the same physical margins, kept for the report and
//! the CLI because millimetres are what print people talk in.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::PageGeometry;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use tracing::debug;

/// Header band content: intentionally empty.
const HEADER_TEMPLATE: &str = "<div></div>";

/// Footer band: right-aligned "current/total" page indicator.
const FOOTER_TEMPLATE: &str = r#"
    <div style="font-size:9px; width:100%; padding:0 8mm; display:flex; justify-content:flex-end;">
      <span><span class="pageNumber"></span>/<span class="totalPages"></span></span>
    </div>"#;

/// Build the print-to-PDF parameters from the geometry and configuration.
pub fn pdf_params(geometry: &PageGeometry, config: &RenderConfig) -> PrintToPdfParams {
    PrintToPdfParams {
        landscape: Some(false),
        display_header_footer: Some(config.page_numbers),
        print_background: Some(config.print_background),
        paper_width: Some(geometry.paper_width_in),
        paper_height: Some(geometry.paper_height_in),
        margin_top: Some(geometry.margin_y_in()),
        margin_bottom: Some(geometry.margin_y_in()),
        margin_left: Some(geometry.margin_x_in()),
        margin_right: Some(geometry.margin_x_in()),
        header_template: Some(HEADER_TEMPLATE.to_string()),
        footer_template: Some(FOOTER_TEMPLATE.to_string()),
        prefer_css_page_size: Some(false),
        ..PrintToPdfParams::default()
    }
}

/// Export the page to PDF bytes.
pub async fn export_pdf(page: &Page, params: PrintToPdfParams) -> Result<Vec<u8>, RenderError> {
    let pdf = page.pdf(params).await.map_err(|e| RenderError::PdfExport {
        detail: e.to_string(),
    })?;
    debug!("Exported PDF: {} bytes", pdf.len());
    Ok(pdf)
}
