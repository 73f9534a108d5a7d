//! Renderer abstraction for browser-based page rendering
//!
//! A [`Renderer`] is the long-lived browser session for one run. Each page is
//! loaded in its own [`RenderContext`] (a tab), which the caller must close
//! when done. Two implementations exist:
//! - [`ChromiumRenderer`]: headless Chromium via the DevTools protocol
//! - [`HttpRenderer`]: plain HTTP fetch with static DOM text, no JavaScript

mod chromium;
mod dom_text;
mod http;

pub use chromium::ChromiumRenderer;
pub use dom_text::inner_text;
pub use http::HttpRenderer;

use crate::config::{BrowserSettings, RendererKind};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a renderer or one of its contexts
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Browser protocol error: {0}")]
    Protocol(String),
}

/// Result type alias for renderer operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// A browser session that hands out one context per page
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Opens a fresh context (tab)
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>>;

    /// Releases the session; later calls are no-ops
    async fn shutdown(&mut self) -> RenderResult<()>;
}

/// A single page-load context
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Loads `url` and waits for the document's load signal
    ///
    /// A transport failure maps to [`RenderError::Navigation`], an HTTP error
    /// status on the main document to [`RenderError::HttpStatus`].
    async fn navigate(&mut self, url: &str) -> RenderResult<()>;

    /// Waits until an element matching `selector` exists
    ///
    /// Returns `Ok(false)` if it did not appear within `timeout`.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> RenderResult<bool>;

    /// Rendered text of the first element matching `selector`, if any
    async fn inner_text(&self, selector: &str) -> RenderResult<Option<String>>;

    /// Rendered text of the first `heading` inside the first `landmark`
    ///
    /// The heading is looked up among the landmark's descendants only, so it
    /// always belongs to the same element [`inner_text`](Self::inner_text)
    /// reads for `landmark`. `None` if either is missing.
    async fn heading_text(&self, landmark: &str, heading: &str) -> RenderResult<Option<String>>;

    /// Closes the context
    async fn close(self: Box<Self>) -> RenderResult<()>;
}

/// Starts the renderer selected by the configuration
pub async fn launch_renderer(settings: &BrowserSettings) -> RenderResult<Box<dyn Renderer>> {
    match settings.renderer {
        RendererKind::Chromium => Ok(Box::new(ChromiumRenderer::launch(settings).await?)),
        RendererKind::Http => Ok(Box::new(HttpRenderer::new()?)),
    }
}
