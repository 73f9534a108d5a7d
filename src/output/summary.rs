//! Run summary reporting

use crate::state::PageStage;
use std::path::PathBuf;

/// A page that was left out of the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Relative path of the page
    pub path: String,

    /// Stage the page failed in
    pub stage: PageStage,

    /// Human-readable error
    pub message: String,
}

/// Outcome of a finished corpus build
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub started_at: String,
    pub finished_at: Option<String>,
    pub duration_ms: u64,

    /// Where the corpus was written
    pub output: PathBuf,

    /// Number of HTML files found under the root
    pub pages_discovered: usize,

    /// Number of records in the corpus
    pub records_written: usize,

    /// Pages skipped under the `skip` failure policy
    pub failures: Vec<PageFailure>,
}

impl CrawlSummary {
    /// Returns true if every discovered page produced a record
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.records_written == self.pages_discovered
    }

    /// Returns the share of discovered pages that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_discovered == 0 {
            return 100.0;
        }
        (self.records_written as f64 / self.pages_discovered as f64) * 100.0
    }
}

/// Prints a summary to stdout in a formatted manner
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Corpus Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at);
    if let Some(finished) = &summary.finished_at {
        println!("  Finished: {}", finished);
    }
    println!("  Duration: {:.2}s", summary.duration_ms as f64 / 1000.0);
    println!();

    println!("Pages:");
    println!("  Discovered: {}", summary.pages_discovered);
    println!("  Written: {}", summary.records_written);
    println!("  Output: {}", summary.output.display());
    println!();

    if !summary.failures.is_empty() {
        println!("Skipped Pages ({}):", summary.failures.len());
        for failure in &summary.failures {
            println!("  - {} [{}]: {}", failure.path, failure.stage, failure.message);
        }
        println!();
    }

    println!("Success Rate: {:.1}%", summary.success_rate());
}
