//! Render-and-extract worker

use crate::browser::{RenderContext, RenderError, Renderer};
use crate::config::ExtractionConfig;
use crate::extract::normalize::{normalize_text, normalize_title};
use crate::remap::remote_path;
use crate::CorpusError;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Normalized content of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub text: String,
}

/// Renders `base_url + relative_path` and extracts its title and text
///
/// A fresh context is opened for the page and closed again before returning,
/// whether extraction succeeded or not. No retries are attempted.
///
/// # Errors
///
/// * `CorpusError::Navigation` - the page could not be loaded or returned an HTTP error
/// * `CorpusError::ContentNotFound` - the landmark never appeared
/// * `CorpusError::MalformedDocument` - the landmark has no heading
/// * `CorpusError::Render` - any other browser failure
#[instrument(skip(renderer, extraction))]
pub async fn extract_page(
    renderer: &dyn Renderer,
    base_url: &str,
    relative_path: &str,
    extraction: &ExtractionConfig,
) -> Result<PageContent, CorpusError> {
    let url = remote_path(base_url, relative_path);
    let mut context = renderer.new_context().await?;

    let result = render_and_extract(context.as_mut(), &url, extraction).await;

    if let Err(e) = context.close().await {
        warn!("Failed to close context for {}: {}", url, e);
    }

    result
}

async fn render_and_extract(
    context: &mut dyn RenderContext,
    url: &str,
    extraction: &ExtractionConfig,
) -> Result<PageContent, CorpusError> {
    context.navigate(url).await.map_err(|e| match e {
        RenderError::Navigation { url, message } => CorpusError::Navigation { url, message },
        RenderError::HttpStatus { url, status } => CorpusError::Navigation {
            url,
            message: format!("HTTP {}", status),
        },
        other => CorpusError::Render(other),
    })?;
    debug!("Loaded {}", url);

    let timeout = Duration::from_millis(extraction.wait_timeout_ms);
    if !context
        .wait_for_selector(&extraction.landmark, timeout)
        .await?
    {
        return Err(CorpusError::ContentNotFound {
            url: url.to_string(),
            selector: extraction.landmark.clone(),
            timeout_ms: extraction.wait_timeout_ms,
        });
    }

    let heading = context
        .heading_text(&extraction.landmark, &extraction.heading)
        .await?
        .ok_or_else(|| CorpusError::MalformedDocument {
            url: url.to_string(),
            selector: extraction.heading.clone(),
        })?;

    // The landmark was present a moment ago; scripts may still remove it
    let body = context
        .inner_text(&extraction.landmark)
        .await?
        .ok_or_else(|| CorpusError::ContentNotFound {
            url: url.to_string(),
            selector: extraction.landmark.clone(),
            timeout_ms: extraction.wait_timeout_ms,
        })?;

    Ok(PageContent {
        title: normalize_title(&heading),
        text: normalize_text(&body),
    })
}
