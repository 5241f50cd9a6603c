//! In-page image wait: block until every `<img>` has settled.
//!
//! The navigation wait only covers resources requested before the load
//! event; images injected or swapped by scripts can still be in flight.
//! This stage asks the page itself, which is the only place that knows.

use crate::error::RenderError;
use crate::output::ImageWaitReport;
use crate::scripts;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use tracing::debug;

/// Run the image-wait script and parse its `{ total, awaited }` result.
pub async fn wait_for_images(page: &Page) -> Result<ImageWaitReport, RenderError> {
    let params = EvaluateParams::builder()
        .expression(scripts::IMAGE_WAIT)
        .await_promise(true)
        .return_by_value(true)
        .build()
        .map_err(RenderError::Internal)?;

    let report: ImageWaitReport = page
        .evaluate(params)
        .await
        .map_err(|e| RenderError::Script {
            context: "image wait",
            detail: e.to_string(),
        })?
        .into_value()
        .map_err(|e| RenderError::Script {
            context: "image wait",
            detail: format!("unreadable result: {e}"),
        })?;

    debug!(
        "Images settled: {} total, {} awaited",
        report.total, report.awaited
    );
    Ok(report)
}
