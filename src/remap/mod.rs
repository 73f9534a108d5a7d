//! Local-to-public path remapping
//!
//! A document is rendered from the local serving origin but recorded under its
//! canonical public URL. Remapping is plain concatenation: relative paths come
//! from discovery and are already `/`-prefixed, and configured hosts have their
//! trailing slash stripped during validation.

use crate::config::CrawlConfig;

const HTML_SUFFIX: &str = ".html";

/// Joins a host base and a relative path
///
/// # Examples
///
/// ```
/// use html_corpus::remap::remote_path;
///
/// assert_eq!(
///     remote_path("https://example.com", "/guide/setup.html"),
///     "https://example.com/guide/setup.html"
/// );
/// ```
pub fn remote_path(host: &str, relative_path: &str) -> String {
    format!("{}{}", host, relative_path)
}

/// Drops a trailing `.html` suffix (`/index.html` -> `/index`)
pub fn clean_url(relative_path: &str) -> &str {
    match relative_path.strip_suffix(HTML_SUFFIX) {
        Some(stem) if !stem.is_empty() && !stem.ends_with('/') => stem,
        _ => relative_path,
    }
}

/// Computes the public path recorded for a document
pub fn public_path(config: &CrawlConfig, relative_path: &str) -> String {
    if config.clean_urls {
        remote_path(&config.remote_host, clean_url(relative_path))
    } else {
        remote_path(&config.remote_host, relative_path)
    }
}

/// Computes the URL a document is rendered from
pub fn local_url(config: &CrawlConfig, relative_path: &str) -> String {
    remote_path(&config.local_host, relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, ConfigLayer};

    fn config(clean_urls: bool) -> CrawlConfig {
        resolve(ConfigLayer {
            directory: Some("site".into()),
            output: Some("out.jsonl".into()),
            remote_host: Some("https://ex.com/".into()),
            clean_urls: Some(clean_urls),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_remote_path_is_concatenation() {
        assert_eq!(remote_path("https://ex.com", "/a.html"), "https://ex.com/a.html");
        assert_eq!(
            remote_path("https://ex.com/docs", "/b/c.html"),
            "https://ex.com/docs/b/c.html"
        );
    }

    #[test]
    fn test_clean_url() {
        assert_eq!(clean_url("/index.html"), "/index");
        assert_eq!(clean_url("/guide/setup.html"), "/guide/setup");
        assert_eq!(clean_url("/plain"), "/plain");
        // A bare ".html" file name has no stem to keep
        assert_eq!(clean_url("/.html"), "/.html");
    }

    #[test]
    fn test_public_path() {
        assert_eq!(public_path(&config(false), "/index.html"), "https://ex.com/index.html");
        assert_eq!(public_path(&config(true), "/index.html"), "https://ex.com/index");
    }

    #[test]
    fn test_public_path_never_local() {
        let config = config(false);
        for relative in ["/a.html", "/b/c.html"] {
            assert_ne!(public_path(&config, relative), local_url(&config, relative));
            assert_eq!(local_url(&config, relative), format!("http://localhost:8000{}", relative));
        }
    }
}
