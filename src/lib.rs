//! html-corpus: turns a tree of static HTML pages into a JSONL text corpus
//!
//! Every page under a root directory is rendered through a browser engine, its
//! primary content region is extracted and normalized, and its local serving
//! path is remapped onto a public origin. The resulting records are written as
//! newline-delimited JSON for downstream indexing.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod extract;
pub mod output;
pub mod remap;
pub mod state;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for corpus builds
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read directory {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Content landmark '{selector}' did not appear on {url} within {timeout_ms}ms")]
    ContentNotFound {
        url: String,
        selector: String,
        timeout_ms: u64,
    },

    #[error("No '{selector}' heading found on {url}")]
    MalformedDocument { url: String, selector: String },

    #[error("Failed to write corpus to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Browser error: {0}")]
    Render(#[from] browser::RenderError),

    #[error("Failed to serialize record for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunPhase,
        to: state::RunPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for corpus operations
pub type CorpusResult<T> = std::result::Result<T, CorpusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{run_crawl, CorpusBuilder};
pub use output::{CrawlSummary, DocumentRecord};
pub use state::{PageStage, RunPhase};
