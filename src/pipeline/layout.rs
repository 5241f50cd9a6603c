//! Diagram layout pass: apply full-page layout inside the page.
//!
//! Runs after the image wait so natural dimensions are final. The script
//! both mutates the DOM and returns one record per diagram, so the caller
//! gets an audit trail of every decision without a second round trip.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::PageGeometry;
use crate::output::DiagramAdjustment;
use crate::scripts;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use tracing::debug;

/// Run the diagram-layout script and parse the per-diagram records.
pub async fn adjust_diagrams(
    page: &Page,
    geometry: &PageGeometry,
    config: &RenderConfig,
) -> Result<Vec<DiagramAdjustment>, RenderError> {
    let script = scripts::layout_script(geometry, config);

    let params = EvaluateParams::builder()
        .expression(script)
        .return_by_value(true)
        .build()
        .map_err(RenderError::Internal)?;

    let adjustments: Vec<DiagramAdjustment> = page
        .evaluate(params)
        .await
        .map_err(|e| RenderError::Script {
            context: "diagram layout",
            detail: e.to_string(),
        })?
        .into_value()
        .map_err(|e| RenderError::Script {
            context: "diagram layout",
            detail: format!("unreadable result: {e}"),
        })?;

    debug!(
        "Diagram layout pass: {} diagram(s), {} promoted",
        adjustments.len(),
        adjustments.iter().filter(|a| a.promoted).count()
    );
    Ok(adjustments)
}
