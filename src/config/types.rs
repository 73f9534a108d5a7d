use serde::Deserialize;
use std::path::PathBuf;

/// Public origin used when none is configured
pub const DEFAULT_REMOTE_HOST: &str = "https://example.com";

/// Local serving origin used when none is configured
pub const DEFAULT_LOCAL_HOST: &str = "http://localhost:8000";

pub(crate) const DEFAULT_LANDMARK: &str = "main";
pub(crate) const DEFAULT_HEADING: &str = "h1";
pub(crate) const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;
pub(crate) const DEFAULT_CONCURRENCY: usize = 1;

/// Fully resolved configuration for one corpus build
///
/// Built once per invocation by [`super::resolve`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root directory that HTML files are discovered under
    pub directory: PathBuf,

    /// Base URL the same files are served from for rendering (no trailing slash)
    pub local_host: String,

    /// Canonical public origin recorded in the output (no trailing slash)
    pub remote_host: String,

    /// JSONL destination, overwritten on success
    pub output: PathBuf,

    /// Drop the `.html` suffix from public paths
    pub clean_urls: bool,

    /// Number of pages rendered at the same time
    pub concurrency: usize,

    /// What to do when a single page fails
    pub on_error: FailurePolicy,

    pub extraction: ExtractionConfig,

    pub browser: BrowserSettings,
}

/// How the landmark and heading are located inside a rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// CSS selector for the primary content region
    pub landmark: String,

    /// CSS selector for the heading, looked up inside the landmark
    pub heading: String,

    /// How long to wait for the landmark to appear (milliseconds)
    pub wait_timeout_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            landmark: DEFAULT_LANDMARK.to_string(),
            heading: DEFAULT_HEADING.to_string(),
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

/// Which renderer to launch and how
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserSettings {
    pub renderer: RendererKind,

    /// Explicit Chrome/Chromium binary; auto-detected when absent
    pub executable: Option<PathBuf>,

    /// Launch Chromium with `--no-sandbox` (needed in most containers)
    pub no_sandbox: bool,
}

/// Available page renderers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Headless Chromium over the DevTools protocol
    #[default]
    Chromium,

    /// Plain HTTP fetch with static DOM text extraction (no JavaScript)
    Http,
}

/// Policy for a page that fails to render or extract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run; nothing is written
    #[default]
    Abort,

    /// Leave the page out of the corpus and report it in the summary
    Skip,
}

/// One source of configuration values (a TOML file or the command line)
///
/// Every field is optional so that layers can be merged before defaults apply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigLayer {
    pub directory: Option<PathBuf>,
    pub remote_host: Option<String>,
    pub local_host: Option<String>,
    pub output: Option<PathBuf>,
    pub clean_urls: Option<bool>,
    pub concurrency: Option<usize>,
    pub on_error: Option<FailurePolicy>,
    #[serde(default)]
    pub extraction: ExtractionLayer,
    #[serde(default)]
    pub browser: BrowserLayer,
}

/// `[extraction]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExtractionLayer {
    pub landmark: Option<String>,
    pub heading: Option<String>,
    pub wait_timeout_ms: Option<u64>,
}

/// `[browser]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BrowserLayer {
    pub renderer: Option<RendererKind>,
    pub executable: Option<PathBuf>,
    pub no_sandbox: Option<bool>,
}

impl ConfigLayer {
    /// Merges two layers; values set in `over` take precedence
    pub fn merge(self, over: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            directory: over.directory.or(self.directory),
            remote_host: over.remote_host.or(self.remote_host),
            local_host: over.local_host.or(self.local_host),
            output: over.output.or(self.output),
            clean_urls: over.clean_urls.or(self.clean_urls),
            concurrency: over.concurrency.or(self.concurrency),
            on_error: over.on_error.or(self.on_error),
            extraction: ExtractionLayer {
                landmark: over.extraction.landmark.or(self.extraction.landmark),
                heading: over.extraction.heading.or(self.extraction.heading),
                wait_timeout_ms: over
                    .extraction
                    .wait_timeout_ms
                    .or(self.extraction.wait_timeout_ms),
            },
            browser: BrowserLayer {
                renderer: over.browser.renderer.or(self.browser.renderer),
                executable: over.browser.executable.or(self.browser.executable),
                no_sandbox: over.browser.no_sandbox.or(self.browser.no_sandbox),
            },
        }
    }
}
