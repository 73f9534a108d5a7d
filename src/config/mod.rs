//! Configuration module for html-corpus
//!
//! Settings come from two layers: an optional TOML file and command-line flags.
//! Layers are merged (flags win), defaults are filled in, and the result is
//! validated into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use html_corpus::config::{load_config_layer, resolve};
//! use std::path::Path;
//!
//! let layer = load_config_layer(Path::new("corpus.toml")).unwrap();
//! let config = resolve(layer).unwrap();
//! println!("Rendering from {}", config.local_host);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserLayer, BrowserSettings, ConfigLayer, CrawlConfig, ExtractionConfig, ExtractionLayer,
    FailurePolicy, RendererKind, DEFAULT_LOCAL_HOST, DEFAULT_REMOTE_HOST,
};

// Re-export parser functions
pub use parser::{load_config_layer, parse_config_layer, resolve};
