use crate::config::types::{
    BrowserSettings, ConfigLayer, CrawlConfig, ExtractionConfig, DEFAULT_CONCURRENCY,
    DEFAULT_HEADING, DEFAULT_LANDMARK, DEFAULT_LOCAL_HOST, DEFAULT_REMOTE_HOST,
    DEFAULT_WAIT_TIMEOUT_MS,
};
use crate::config::validation::{normalize_host, validate};
use crate::ConfigError;
use std::path::Path;

/// Loads a configuration layer from a TOML file
///
/// The file may set any subset of the options; missing values are filled in
/// later by [`resolve`].
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ConfigLayer)` - Successfully parsed layer
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_config_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config_layer(&content)
}

/// Parses a configuration layer from TOML text
pub fn parse_config_layer(content: &str) -> Result<ConfigLayer, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Applies defaults to a merged layer and validates the result
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Complete, validated configuration
/// * `Err(ConfigError)` - A required value is missing or a value is invalid
///
/// # Example
///
/// ```
/// use html_corpus::config::{resolve, ConfigLayer};
///
/// let layer = ConfigLayer {
///     directory: Some("public".into()),
///     output: Some("corpus.jsonl".into()),
///     ..Default::default()
/// };
/// let config = resolve(layer).unwrap();
/// assert_eq!(config.remote_host, "https://example.com");
/// assert_eq!(config.local_host, "http://localhost:8000");
/// ```
pub fn resolve(layer: ConfigLayer) -> Result<CrawlConfig, ConfigError> {
    let directory = layer
        .directory
        .ok_or_else(|| ConfigError::Validation("directory is required".to_string()))?;
    let output = layer
        .output
        .ok_or_else(|| ConfigError::Validation("output is required".to_string()))?;

    let remote_host = normalize_host(
        "remote-host",
        layer.remote_host.as_deref().unwrap_or(DEFAULT_REMOTE_HOST),
    )?;
    let local_host = normalize_host(
        "local-host",
        layer.local_host.as_deref().unwrap_or(DEFAULT_LOCAL_HOST),
    )?;

    let config = CrawlConfig {
        directory,
        local_host,
        remote_host,
        output,
        clean_urls: layer.clean_urls.unwrap_or(false),
        concurrency: layer.concurrency.unwrap_or(DEFAULT_CONCURRENCY),
        on_error: layer.on_error.unwrap_or_default(),
        extraction: ExtractionConfig {
            landmark: layer
                .extraction
                .landmark
                .unwrap_or_else(|| DEFAULT_LANDMARK.to_string()),
            heading: layer
                .extraction
                .heading
                .unwrap_or_else(|| DEFAULT_HEADING.to_string()),
            wait_timeout_ms: layer
                .extraction
                .wait_timeout_ms
                .unwrap_or(DEFAULT_WAIT_TIMEOUT_MS),
        },
        browser: BrowserSettings {
            renderer: layer.browser.renderer.unwrap_or_default(),
            executable: layer.browser.executable,
            no_sandbox: layer.browser.no_sandbox.unwrap_or(false),
        },
    };

    validate(&config)?;

    Ok(config)
}
