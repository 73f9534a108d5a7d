//! Corpus builder - main crawl orchestration logic
//!
//! The builder owns the run phase and lends one renderer to every page
//! operation. Pages are processed through an order-preserving buffered stream:
//! with a concurrency of 1 this is a plain sequential loop, with more it keeps
//! up to N pages in flight while still yielding results in enumeration order.

use crate::browser::Renderer;
use crate::config::{CrawlConfig, FailurePolicy};
use crate::discovery::enumerate_html_files;
use crate::extract::extract_page;
use crate::output::{write_corpus, CrawlSummary, DocumentRecord, PageFailure};
use crate::remap::public_path;
use crate::state::{PageStage, RunPhase};
use crate::CorpusError;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Records and skipped pages produced by the crawl phase
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    /// Records in enumeration order
    pub records: Vec<DocumentRecord>,

    /// Pages left out under the `skip` policy
    pub failures: Vec<PageFailure>,
}

/// Orchestrates one corpus build
pub struct CorpusBuilder<'a> {
    config: &'a CrawlConfig,
    phase: RunPhase,
    started: Instant,
    started_at: String,
}

impl<'a> CorpusBuilder<'a> {
    /// Creates a builder in the `Idle` phase
    pub fn new(config: &'a CrawlConfig) -> Self {
        Self {
            config,
            phase: RunPhase::Idle,
            started: Instant::now(),
            started_at: Utc::now().to_rfc3339(),
        }
    }

    /// Current phase of the run
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Marks the run as aborted (no-op once terminal)
    pub fn abort(&mut self) {
        if !self.phase.is_terminal() {
            debug!("Run aborted during {}", self.phase);
            self.phase = RunPhase::Aborted;
        }
    }

    fn transition(&mut self, next: RunPhase) -> Result<(), CorpusError> {
        if !self.phase.can_transition_to(next) {
            return Err(CorpusError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        debug!("Run phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Discovers the HTML files to crawl
    pub fn enumerate(&mut self) -> Result<Vec<String>, CorpusError> {
        self.transition(RunPhase::Enumerating)?;

        match enumerate_html_files(&self.config.directory) {
            Ok(paths) => {
                info!(
                    "Found {} HTML files under {}",
                    paths.len(),
                    self.config.directory.display()
                );
                Ok(paths)
            }
            Err(e) => {
                self.abort();
                Err(e)
            }
        }
    }

    /// Crawls `paths`, shuts the renderer down and writes the corpus
    ///
    /// The renderer is shut down exactly once, before the output is written,
    /// whether or not crawling succeeded.
    pub async fn build(
        &mut self,
        renderer: &mut dyn Renderer,
        paths: &[String],
    ) -> Result<CrawlSummary, CorpusError> {
        let crawled = self.crawl(&*renderer, paths).await;

        if let Err(e) = renderer.shutdown().await {
            warn!("Failed to shut down renderer: {}", e);
        }

        let outcome = match crawled {
            Ok(outcome) => outcome,
            Err(e) => {
                self.abort();
                return Err(e);
            }
        };

        if let Err(e) = self.write(&outcome.records).await {
            self.abort();
            return Err(e);
        }

        Ok(CrawlSummary {
            started_at: self.started_at.clone(),
            finished_at: Some(Utc::now().to_rfc3339()),
            duration_ms: self.started.elapsed().as_millis() as u64,
            output: self.config.output.clone(),
            pages_discovered: paths.len(),
            records_written: outcome.records.len(),
            failures: outcome.failures,
        })
    }

    /// Renders every page and accumulates records in enumeration order
    pub async fn crawl(
        &mut self,
        renderer: &dyn Renderer,
        paths: &[String],
    ) -> Result<CrawlOutcome, CorpusError> {
        self.transition(RunPhase::Crawling)?;

        let config = self.config;
        let total = paths.len();
        let mut pages = stream::iter(paths.iter().enumerate())
            .map(move |(index, path)| async move {
                let result = process_page(config, renderer, path, index, total).await;
                (path, result)
            })
            .buffered(config.concurrency);

        let mut outcome = CrawlOutcome {
            records: Vec::with_capacity(total),
            failures: Vec::new(),
        };

        while let Some((path, result)) = pages.next().await {
            match result {
                Ok(record) => {
                    debug!(stage = %PageStage::Accumulating, "Accumulated {}", path);
                    outcome.records.push(record);
                }
                Err(e) => match config.on_error {
                    FailurePolicy::Abort => {
                        error!("Failed to crawl {}: {}", path, e);
                        // Pages still in flight are dropped without closing
                        // their contexts; renderer shutdown releases them
                        return Err(e);
                    }
                    FailurePolicy::Skip => {
                        warn!("Skipping {}: {}", path, e);
                        outcome.failures.push(PageFailure {
                            path: path.clone(),
                            stage: PageStage::of_error(&e),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        info!(
            "Crawled {} pages ({} skipped)",
            outcome.records.len(),
            outcome.failures.len()
        );

        Ok(outcome)
    }

    /// Serializes the records to the configured output
    pub async fn write(&mut self, records: &[DocumentRecord]) -> Result<(), CorpusError> {
        self.transition(RunPhase::Serializing)?;
        write_corpus(&self.config.output, records).await?;
        info!(
            "Wrote {} records to {}",
            records.len(),
            self.config.output.display()
        );
        self.transition(RunPhase::Done)
    }
}

/// Turns one relative path into a record
async fn process_page(
    config: &CrawlConfig,
    renderer: &dyn Renderer,
    path: &str,
    index: usize,
    total: usize,
) -> Result<DocumentRecord, CorpusError> {
    info!("Crawling {} ({}/{})", path, index + 1, total);

    debug!(stage = %PageStage::Rendering, "Rendering {}", path);
    let content = extract_page(renderer, &config.local_host, path, &config.extraction).await?;

    debug!(stage = %PageStage::Remapping, "Remapping {}", path);
    Ok(DocumentRecord {
        path: public_path(config, path),
        title: content.title,
        text: content.text,
    })
}
