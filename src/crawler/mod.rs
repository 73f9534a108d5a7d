//! Crawler module for corpus building
//!
//! This module contains the orchestration that ties the pipeline together:
//! - Discovering HTML files under the root directory
//! - Launching one renderer for the whole run
//! - Rendering, extracting and remapping every page
//! - Writing the accumulated records as JSONL

mod coordinator;

pub use coordinator::{CorpusBuilder, CrawlOutcome};

use crate::browser::launch_renderer;
use crate::config::CrawlConfig;
use crate::discovery::enumerate_html_files;
use crate::output::CrawlSummary;
use crate::remap::{local_url, public_path};
use crate::CorpusError;

/// Runs a complete corpus build
///
/// This is the main entry point. It will:
/// 1. Enumerate HTML files (a missing root fails before any browser starts)
/// 2. Launch the configured renderer
/// 3. Render and extract every page in enumeration order
/// 4. Shut the renderer down, on success and on failure
/// 5. Write the corpus to the configured output
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Corpus written
/// * `Err(CorpusError)` - Run aborted; the output file was not touched
pub async fn run_crawl(config: &CrawlConfig) -> Result<CrawlSummary, CorpusError> {
    let mut builder = CorpusBuilder::new(config);
    let paths = builder.enumerate()?;

    let mut renderer = match launch_renderer(&config.browser).await {
        Ok(renderer) => renderer,
        Err(e) => {
            builder.abort();
            return Err(e.into());
        }
    };

    builder.build(renderer.as_mut(), &paths).await
}

/// A page that would be crawled, as listed by a dry run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPage {
    pub relative_path: String,
    pub local_url: String,
    pub public_path: String,
}

/// Lists every page a run would crawl without rendering anything
pub fn plan_crawl(config: &CrawlConfig) -> Result<Vec<PlannedPage>, CorpusError> {
    let paths = enumerate_html_files(&config.directory)?;
    Ok(paths
        .into_iter()
        .map(|relative_path| PlannedPage {
            local_url: local_url(config, &relative_path),
            public_path: public_path(config, &relative_path),
            relative_path,
        })
        .collect())
}
