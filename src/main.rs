//! html-corpus main entry point
//!
//! This is the command-line interface for building a text corpus from a tree
//! of static HTML pages.

use anyhow::Context;
use clap::Parser;
use html_corpus::config::{
    load_config_layer, resolve, BrowserLayer, ConfigLayer, CrawlConfig, ExtractionLayer,
    FailurePolicy, RendererKind,
};
use html_corpus::crawler::{plan_crawl, run_crawl};
use html_corpus::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// html-corpus: crawl local HTML files and extract text
///
/// Every `.html` file under DIRECTORY is loaded from the local web server,
/// its main content is extracted and normalized, and one JSON record per page
/// is written to OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "html-corpus")]
#[command(version)]
#[command(about = "Crawl local HTML files and extract text", long_about = None)]
struct Cli {
    /// Directory containing the HTML files
    #[arg(long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Public origin recorded in the output [default: https://example.com]
    #[arg(long, value_name = "URL")]
    remote_host: Option<String>,

    /// Locally hosted web server serving the HTML files [default: http://localhost:8000]
    #[arg(long, value_name = "URL")]
    local_host: Option<String>,

    /// Path to the output JSONL file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page renderer to use
    #[arg(long, value_enum)]
    renderer: Option<RendererKind>,

    /// Number of pages rendered at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// What to do when a page fails
    #[arg(long, value_enum)]
    on_error: Option<FailurePolicy>,

    /// Drop the .html suffix from public paths
    #[arg(long)]
    clean_urls: bool,

    /// CSS selector of the primary content region [default: main]
    #[arg(long, value_name = "SELECTOR")]
    landmark: Option<String>,

    /// CSS selector of the heading inside the landmark [default: h1]
    #[arg(long, value_name = "SELECTOR")]
    heading: Option<String>,

    /// How long to wait for the landmark, in milliseconds [default: 30000]
    #[arg(long, value_name = "MS")]
    wait_timeout_ms: Option<u64>,

    /// Chrome/Chromium executable to launch
    #[arg(long, value_name = "PATH")]
    browser_executable: Option<PathBuf>,

    /// Launch Chromium without its sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// List the pages that would be crawled and exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Converts the flags into a configuration layer; unset flags stay `None`
    fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            directory: self.directory.clone(),
            remote_host: self.remote_host.clone(),
            local_host: self.local_host.clone(),
            output: self.output.clone(),
            clean_urls: self.clean_urls.then_some(true),
            concurrency: self.concurrency,
            on_error: self.on_error,
            extraction: ExtractionLayer {
                landmark: self.landmark.clone(),
                heading: self.heading.clone(),
                wait_timeout_ms: self.wait_timeout_ms,
            },
            browser: BrowserLayer {
                renderer: self.renderer,
                executable: self.browser_executable.clone(),
                no_sandbox: self.no_sandbox.then_some(true),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("html_corpus=info,warn"),
            1 => EnvFilter::new("html_corpus=debug,info"),
            2 => EnvFilter::new("html_corpus=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges the config file (if any) with the command-line flags
fn load_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let file_layer = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config_layer(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ConfigLayer::default(),
    };

    let config = resolve(file_layer.merge(cli.to_layer())).context("invalid configuration")?;
    tracing::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Handles the --dry-run mode: lists what would be crawled
fn handle_dry_run(config: &CrawlConfig) -> anyhow::Result<()> {
    let plan = plan_crawl(config).context("failed to enumerate HTML files")?;

    println!("=== html-corpus Dry Run ===\n");
    println!("Directory: {}", config.directory.display());
    println!("Local host: {}", config.local_host);
    println!("Remote host: {}", config.remote_host);
    println!("Output: {}", config.output.display());
    println!("Renderer: {:?}", config.browser.renderer);
    println!("\nPages ({}):", plan.len());
    for page in &plan {
        println!("  {} -> {}", page.local_url, page.public_path);
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &CrawlConfig, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} via {} (public host {})",
        config.directory.display(),
        config.local_host,
        config.remote_host
    );

    let summary = run_crawl(config).await.context("crawl failed")?;

    if !quiet {
        print_summary(&summary);
    }
    if !summary.is_complete() {
        tracing::warn!(
            "{} of {} pages were skipped ({:.1}% written)",
            summary.failures.len(),
            summary.pages_discovered,
            summary.success_rate()
        );
    }

    Ok(())
}
