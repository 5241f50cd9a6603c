//! The headless-Chromium session: launch, navigate, tear down.
//!
//! ## Ownership model
//!
//! The browser process is an exclusively-owned external resource: acquired
//! in [`BrowserSession::launch`], used for exactly one page render, and
//! released in [`BrowserSession::close`]. There is no pooling or reuse — a
//! fresh process per render keeps state leakage between documents
//! impossible and teardown trivially correct.
//!
//! The CDP event handler must be polled for the whole session lifetime or
//! every in-flight request stalls; it runs as a spawned task that is joined
//! during teardown.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::PageGeometry;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// An exclusively-owned headless browser, alive until [`close`](Self::close).
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a headless browser with a viewport covering the full page.
    ///
    /// The viewport spans the whole paper (794×1122 px for A4 at 96 DPI),
    /// not just the printable area: margins are applied by the print
    /// engine, not the layout.
    pub async fn launch(
        config: &RenderConfig,
        geometry: &PageGeometry,
    ) -> Result<Self, RenderError> {
        let (width, height) = geometry.viewport_px();

        let mut builder = BrowserConfig::builder()
            .window_size(width, height)
            .viewport(Viewport {
                width,
                height,
                device_scale_factor: Some(1.0),
                ..Viewport::default()
            })
            .request_timeout(Duration::from_secs(config.request_timeout_secs));

        if let Some(ref exe) = config.browser_executable {
            builder = builder.chrome_executable(exe);
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }

        // build() fails when no Chrome/Chromium executable can be located
        // (and no pinned path was given), which is the missing-dependency
        // case: surface it with an installation hint.
        let browser_config = builder.build().map_err(RenderError::BrowserNotFound)?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| RenderError::BrowserLaunch {
                    detail: e.to_string(),
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        info!("Browser launched, viewport {}x{}", width, height);
        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open the document: new page, navigate, wait for it to settle, and
    /// force print media emulation so print-specific styling applies.
    pub async fn open(&self, url: &Url) -> Result<Page, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::BrowserLaunch {
                detail: format!("failed to open page: {e}"),
            })?;

        page.goto(url.as_str())
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        // Wait for the load to settle; late-loading images are covered by
        // the explicit in-page wait that follows.
        page.wait_for_navigation()
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        page.execute(SetEmulatedMediaParams {
            media: Some("print".to_string()),
            features: None,
        })
        .await
        .map_err(|e| RenderError::Script {
            context: "print media emulation",
            detail: e.to_string(),
        })?;

        debug!("Navigated to {} with print media emulation", url);
        Ok(page)
    }

    /// Shut the browser down and join the handler task.
    pub async fn close(mut self) -> Result<(), RenderError> {
        self.browser
            .close()
            .await
            .map_err(|e| RenderError::Internal(format!("browser close failed: {e}")))?;
        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {e}");
        }
        self.handler_task.await.ok();
        debug!("Browser session closed");
        Ok(())
    }
}
