//! Output module for corpus records and run summaries
//!
//! This module handles:
//! - The `DocumentRecord` type written for every page
//! - Encoding records as newline-delimited JSON and writing the corpus file
//! - Summarizing a finished run for the operator

mod jsonl;
mod record;
mod summary;

pub use jsonl::{encode_corpus, parse_corpus, write_corpus};
pub use record::DocumentRecord;
pub use summary::{print_summary, CrawlSummary, PageFailure};
