//! Static HTTP renderer
//!
//! Fetches pages with a plain HTTP client and reads text from the parsed DOM.
//! No scripts run, so this only suits pages whose content is present in the
//! served HTML.

use crate::browser::{inner_text, RenderContext, RenderError, RenderResult, Renderer};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

/// A renderer backed by an HTTP client
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Builds the HTTP client
    pub fn new() -> RenderResult<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>> {
        Ok(Box::new(HttpContext {
            client: self.client.clone(),
            html: None,
        }))
    }

    async fn shutdown(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// One fetched document
struct HttpContext {
    client: Client,
    html: Option<String>,
}

impl HttpContext {
    fn document(&self) -> RenderResult<&str> {
        self.html
            .as_deref()
            .ok_or_else(|| RenderError::Protocol("no page loaded".to_string()))
    }
}

#[async_trait]
impl RenderContext for HttpContext {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: describe_request_error(&e),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(RenderError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        self.html = Some(body);
        Ok(())
    }

    /// Without scripts the DOM never changes, so one check decides the outcome
    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> RenderResult<bool> {
        Ok(select_text(self.document()?, selector)?.is_some())
    }

    async fn inner_text(&self, selector: &str) -> RenderResult<Option<String>> {
        select_text(self.document()?, selector)
    }

    async fn heading_text(&self, landmark: &str, heading: &str) -> RenderResult<Option<String>> {
        let landmark = parse_selector(landmark)?;
        let heading = parse_selector(heading)?;
        let document = Html::parse_document(self.document()?);

        let text = document
            .select(&landmark)
            .next()
            .and_then(|region| region.select(&heading).next())
            .map(inner_text);
        Ok(text)
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        Ok(())
    }
}

/// Text of the first element matching `selector`
fn select_text(html: &str, selector: &str) -> RenderResult<Option<String>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let text = document.select(&selector).next().map(inner_text);
    Ok(text)
}

fn parse_selector(selector: &str) -> RenderResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| RenderError::Protocol(format!("invalid selector '{}': {:?}", selector, e)))
}

fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection refused: {}", error)
    } else {
        error.to_string()
    }
}
