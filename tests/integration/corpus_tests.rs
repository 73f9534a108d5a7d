//! Integration tests for corpus builds
//!
//! These tests serve HTML fixtures from wiremock servers and run the full
//! pipeline end-to-end with the HTTP renderer.

use html_corpus::config::{
    resolve, BrowserLayer, ConfigLayer, CrawlConfig, ExtractionLayer, FailurePolicy, RendererKind,
};
use html_corpus::output::parse_corpus;
use html_corpus::{run_crawl, CorpusError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a fixture file under the site root
fn write_page(root: &Path, relative: &str, html: &str) {
    let file = root.join(relative.trim_start_matches('/'));
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, html).unwrap();
}

/// Serves a page at `route` on the mock server
async fn serve_page(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Creates a test configuration rendering from `local_host`
fn create_test_config(dir: &TempDir, local_host: &str, layer: ConfigLayer) -> CrawlConfig {
    let base = ConfigLayer {
        directory: Some(dir.path().join("site")),
        output: Some(dir.path().join("corpus.jsonl")),
        local_host: Some(local_host.to_string()),
        remote_host: Some("https://ex.com".to_string()),
        browser: BrowserLayer {
            renderer: Some(RendererKind::Http),
            ..Default::default()
        },
        ..Default::default()
    };
    resolve(base.merge(layer)).expect("valid test config")
}

#[tokio::test]
async fn test_single_page_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let html = "<html><head><title>Ignored</title></head><body><main><h1>Hello</h1><p>World</p></main></body></html>";

    write_page(&dir.path().join("site"), "/index.html", html);
    serve_page(&mock_server, "/index.html", html).await;

    let config = create_test_config(
        &dir,
        &mock_server.uri(),
        ConfigLayer {
            clean_urls: Some(true),
            ..Default::default()
        },
    );

    let summary = run_crawl(&config).await.expect("crawl succeeds");
    assert_eq!(summary.pages_discovered, 1);
    assert_eq!(summary.records_written, 1);
    assert!(summary.is_complete());

    let written = fs::read_to_string(&config.output).unwrap();
    assert_eq!(
        written,
        r#"{"path":"https://ex.com/index","title":"Hello","text":"Hello\n\nWorld"}"#
    );
}

#[tokio::test]
async fn test_records_follow_enumeration_order() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    let pages = [
        ("/a.html", "<main><h1>Alpha</h1><p>first</p></main>"),
        ("/b/c.html", "<main><h1>Charlie</h1><p>second</p></main>"),
        ("/b/d.html", "<main><h1>Delta \u{2014} page</h1><p>caf\u{e9}</p>\n\n\n<p>third</p></main>"),
    ];
    for (route, html) in pages {
        write_page(&site, route, html);
        serve_page(&mock_server, route, html).await;
    }
    fs::write(site.join("notes.txt"), "not html").unwrap();

    let config = create_test_config(&dir, &mock_server.uri(), ConfigLayer::default());
    run_crawl(&config).await.expect("crawl succeeds");

    let records = parse_corpus(&fs::read_to_string(&config.output).unwrap()).unwrap();
    assert_eq!(records.len(), 3);

    let paths: Vec<&str> = records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "https://ex.com/a.html",
            "https://ex.com/b/c.html",
            "https://ex.com/b/d.html"
        ]
    );

    assert_eq!(records[2].title, "Delta  page");
    assert_eq!(records[2].text, "Delta  page\n\ncaf\n\nthird");

    for record in &records {
        assert!(record.title.is_ascii());
        assert!(record.text.is_ascii());
        assert!(!record.text.contains("\n\n\n"));
        assert!(!record.path.starts_with(&mock_server.uri()));
    }
}

#[tokio::test]
async fn test_empty_directory_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("site")).unwrap();

    let config = create_test_config(&dir, "http://127.0.0.1:1", ConfigLayer::default());
    let summary = run_crawl(&config).await.expect("crawl succeeds");

    assert_eq!(summary.records_written, 0);
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "");
}

#[tokio::test]
async fn test_missing_root_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir, "http://127.0.0.1:1", ConfigLayer::default());

    let err = run_crawl(&config).await.unwrap_err();

    assert!(matches!(err, CorpusError::FileSystem { .. }));
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_not_found_page_aborts_before_writing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    let html = "<main><h1>Fine</h1><p>ok</p></main>";
    write_page(&site, "/a.html", html);
    serve_page(&mock_server, "/a.html", html).await;
    // Present on disk but not served: the mock server answers 404
    write_page(&site, "/b.html", html);

    let config = create_test_config(&dir, &mock_server.uri(), ConfigLayer::default());
    fs::write(&config.output, "previous corpus").unwrap();

    let err = run_crawl(&config).await.unwrap_err();

    assert!(matches!(err, CorpusError::Navigation { ref url, .. } if url.ends_with("/b.html")));
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        "previous corpus"
    );
}

#[tokio::test]
async fn test_missing_landmark_and_heading() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    let no_main = "<body><div><h1>Title</h1></div></body>";
    write_page(&site, "/no-main.html", no_main);
    serve_page(&mock_server, "/no-main.html", no_main).await;

    let config = create_test_config(&dir, &mock_server.uri(), ConfigLayer::default());
    let err = run_crawl(&config).await.unwrap_err();
    assert!(matches!(err, CorpusError::ContentNotFound { .. }));

    fs::remove_file(site.join("no-main.html")).unwrap();
    let no_heading = "<main><p>Only text</p></main>";
    write_page(&site, "/no-heading.html", no_heading);
    serve_page(&mock_server, "/no-heading.html", no_heading).await;

    let err = run_crawl(&config).await.unwrap_err();
    assert!(matches!(err, CorpusError::MalformedDocument { .. }));
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_heading_is_read_from_the_landmark() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    let html = "<main><h1>Hello</h1><p>World</p></main>";
    write_page(&site, "/index.html", html);
    serve_page(&mock_server, "/index.html", html).await;

    let config = create_test_config(
        &dir,
        &mock_server.uri(),
        ConfigLayer {
            extraction: ExtractionLayer {
                landmark: Some("main, article".to_string()),
                ..Default::default()
            },
            ..Default::default()
        },
    );
    run_crawl(&config).await.expect("crawl succeeds");

    let records = parse_corpus(&fs::read_to_string(&config.output).unwrap()).unwrap();
    assert_eq!(records[0].title, "Hello");
    assert_eq!(records[0].text, "Hello\n\nWorld");
}

#[tokio::test]
async fn test_heading_in_a_later_landmark_is_malformed() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    let html = "<section><p>intro</p></section><section><h1>Other</h1></section>";
    write_page(&site, "/split.html", html);
    serve_page(&mock_server, "/split.html", html).await;

    let config = create_test_config(
        &dir,
        &mock_server.uri(),
        ConfigLayer {
            extraction: ExtractionLayer {
                landmark: Some("section".to_string()),
                ..Default::default()
            },
            ..Default::default()
        },
    );

    let err = run_crawl(&config).await.unwrap_err();
    assert!(matches!(err, CorpusError::MalformedDocument { ref selector, .. } if selector == "h1"));
    assert!(!config.output.exists());
}

#[tokio::test]
async fn test_skip_policy_with_concurrency() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");

    for name in ["a", "b", "c", "d", "e"] {
        let route = format!("/{}.html", name);
        let html = format!("<main><h1>{}</h1><p>body {}</p></main>", name, name);
        write_page(&site, &route, &html);
        if name != "c" {
            serve_page(&mock_server, &route, &html).await;
        }
    }

    let config = create_test_config(
        &dir,
        &mock_server.uri(),
        ConfigLayer {
            concurrency: Some(3),
            on_error: Some(FailurePolicy::Skip),
            ..Default::default()
        },
    );

    let summary = run_crawl(&config).await.expect("crawl succeeds");
    assert_eq!(summary.pages_discovered, 5);
    assert_eq!(summary.records_written, 4);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, "/c.html");
    assert!(!summary.is_complete());

    let records = parse_corpus(&fs::read_to_string(&config.output).unwrap()).unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "d", "e"]);
}
