use crate::config::types::{CrawlConfig, ExtractionConfig};
use crate::ConfigError;
use url::Url;

const MAX_CONCURRENCY: usize = 64;
const MIN_WAIT_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_hosts(&config.local_host, &config.remote_host)?;
    validate_concurrency(config.concurrency)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Checks that a host is an absolute http(s) URL and strips one trailing slash
///
/// Relative paths always start with `/`, so the stored host must not end with one.
pub fn normalize_host(name: &str, host: &str) -> Result<String, ConfigError> {
    let url = Url::parse(host)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, host, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, host
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            name, host
        )));
    }

    Ok(host.strip_suffix('/').unwrap_or(host).to_string())
}

/// Remote and local origins must differ so a public path never equals its local form
fn validate_hosts(local_host: &str, remote_host: &str) -> Result<(), ConfigError> {
    if local_host.eq_ignore_ascii_case(remote_host) {
        return Err(ConfigError::Validation(format!(
            "remote-host and local-host must differ, both are '{}'",
            remote_host
        )));
    }
    Ok(())
}

fn validate_concurrency(concurrency: usize) -> Result<(), ConfigError> {
    if !(1..=MAX_CONCURRENCY).contains(&concurrency) {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, concurrency
        )));
    }
    Ok(())
}

fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if config.landmark.trim().is_empty() {
        return Err(ConfigError::Validation(
            "landmark selector cannot be empty".to_string(),
        ));
    }

    if config.heading.trim().is_empty() {
        return Err(ConfigError::Validation(
            "heading selector cannot be empty".to_string(),
        ));
    }

    if config.wait_timeout_ms < MIN_WAIT_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "wait-timeout-ms must be >= {}ms, got {}ms",
            MIN_WAIT_TIMEOUT_MS, config.wait_timeout_ms
        )));
    }

    Ok(())
}
