//! Headless Chromium renderer
//!
//! Drives a Chromium process over the DevTools protocol. The protocol handler
//! runs on its own tokio task for the lifetime of the session.

use crate::browser::{RenderContext, RenderError, RenderResult, Renderer};
use crate::config::BrowserSettings;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delay between landmark checks while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// HTTP status of the main document, or null when the browser doesn't expose it
const NAVIGATION_STATUS_JS: &str = r#"(() => {
    const entry = performance.getEntriesByType('navigation')[0];
    return entry && entry.responseStatus ? entry.responseStatus : null;
})()"#;

/// A headless Chromium session
pub struct ChromiumRenderer {
    browser: Browser,
    handler: Option<JoinHandle<()>>,
    closed: bool,
}

impl ChromiumRenderer {
    /// Launches Chromium with the given settings
    pub async fn launch(settings: &BrowserSettings) -> RenderResult<Self> {
        let mut builder = BrowserConfig::builder();
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    if is_connection_lost(&e) {
                        tracing::debug!("Browser connection lost: {}", e);
                        break;
                    }
                    tracing::debug!("Browser handler error: {}", e);
                }
            }
        });

        tracing::info!("Launched headless Chromium");

        Ok(Self {
            browser,
            handler: Some(handler),
            closed: false,
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Protocol(format!("failed to open tab: {}", e)))?;
        Ok(Box::new(ChromiumContext { page }))
    }

    async fn shutdown(&mut self) -> RenderResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Protocol(format!("failed to close browser: {}", e)));

        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Waiting for browser process failed: {}", e);
        }
        if let Some(handler) = self.handler.take() {
            let _ = handler.await;
        }

        tracing::debug!("Chromium session closed");
        result
    }
}

impl Drop for ChromiumRenderer {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

/// One Chromium tab
struct ChromiumContext {
    page: Page,
}

impl ChromiumContext {
    async fn evaluate<T: DeserializeOwned>(&self, script: &str) -> RenderResult<T> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))?;
        // A JS `null` comes back with no value at all
        let value = result.value().cloned().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(|e| RenderError::Protocol(e.to_string()))
    }
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status: Option<u16> = self.evaluate(NAVIGATION_STATUS_JS).await?;
        match status {
            Some(status) if status >= 400 => Err(RenderError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            _ => Ok(()),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> RenderResult<bool> {
        let script = format!("document.querySelector({}) !== null", js_string(selector));
        let deadline = Instant::now() + timeout;

        loop {
            if self.evaluate::<bool>(&script).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn inner_text(&self, selector: &str) -> RenderResult<Option<String>> {
        let script = format!(
            "(() => {{ const el = document.querySelector({}); return el ? el.innerText : null; }})()",
            js_string(selector)
        );
        self.evaluate(&script).await
    }

    async fn heading_text(&self, landmark: &str, heading: &str) -> RenderResult<Option<String>> {
        let script = format!(
            "(() => {{ const el = document.querySelector({})?.querySelector({}); return el ? el.innerText : null; }})()",
            js_string(landmark),
            js_string(heading)
        );
        self.evaluate(&script).await
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        self.page
            .close()
            .await
            .map_err(|e| RenderError::Protocol(format!("failed to close tab: {}", e)))
    }
}

/// Only a broken websocket ends the session; undecodable events don't
fn is_connection_lost(error: &CdpError) -> bool {
    matches!(error, CdpError::Ws(_))
}

/// Quotes a value as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
