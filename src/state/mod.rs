//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `RunPhase`: The phase of a whole corpus build (enumerating, crawling, serializing, ...)
//! - `PageStage`: The stage a single page was in, used to label page failures

mod page_stage;
mod run_phase;

// Re-export main types
pub use page_stage::PageStage;
pub use run_phase::RunPhase;
