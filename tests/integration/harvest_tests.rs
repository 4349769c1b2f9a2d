use quotes_harvest::config::{load_config, Config};
use quotes_harvest::crawler::{harvest, HttpFetcher, PageSource};
use quotes_harvest::output::read_quotes;
use quotes_harvest::{run_with_config, ExtractError, HarvestError};
use std::io::Write;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Listing page with `count` quotes, shaped like quotes.toscrape.com
fn page_html(page: u32, count: usize) -> String {
    let quotes: String = (0..count)
        .map(|i| {
            format!(
                r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
        <span class="text" itemprop="text">“Quote {page}.{i}”</span>
        <span>by <small class="author" itemprop="author">Author {page}</small>
        <a href="/author/Author-{page}">(about)</a></span>
        <div class="tags">Tags:
            <a class="tag" href="/tag/page-{page}/page/1/">page-{page}</a>
            <a class="tag" href="/tag/n{i}/page/1/">n{i}</a>
        </div>
    </div>"#
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><title>Quotes</title></head>
<body><div class="container"><div class="row"><div class="col-md-8">{quotes}</div></div></div></body></html>"#
    )
}

const EMPTY_PAGE: &str = r#"<!DOCTYPE html><html><body><div class="col-md-8">No quotes found!</div></body></html>"#;

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Mounts pages 1..=count with `per_page` quotes each
async fn mount_listing(server: &MockServer, count: u32, per_page: usize) {
    mount_pages(server, 1..=count, per_page).await;
}

/// Mounts the given pages with `per_page` quotes each
async fn mount_pages(server: &MockServer, pages: impl IntoIterator<Item = u32>, per_page: usize) {
    for page in pages {
        Mock::given(method("GET"))
            .and(path(format!("/page/{}/", page)))
            .respond_with(html(page_html(page, per_page)))
            .mount(server)
            .await;
    }
}

/// Every other GET answers with a page that has no quotes
async fn mount_empty_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(html(EMPTY_PAGE.to_string()))
        .mount(server)
        .await;
}

fn test_config(server: &MockServer, batch_size: u32, csv_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = server.uri();
    config.crawler.batch_size = batch_size;
    config.output.csv_path = csv_path.to_path_buf();
    config
}

fn expected_texts(pages: impl IntoIterator<Item = u32>, per_page: usize) -> Vec<String> {
    pages
        .into_iter()
        .flat_map(|p| (0..per_page).map(move |i| format!("“Quote {p}.{i}”")))
        .collect()
}

async fn requested_pages(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .len()
}

#[tokio::test]
async fn test_twenty_three_pages_end_to_end() {
    let server = MockServer::start().await;
    mount_listing(&server, 23, 3).await;
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("quotes.csv");
    let config = test_config(&server, 10, &csv_path);

    let stats = run_with_config(&config).await.expect("harvest failed");

    assert_eq!(stats.quotes_written, 69);
    assert_eq!(stats.traversal.rounds, 4);
    assert_eq!(stats.traversal.pages_with_quotes, 23);
    assert_eq!(requested_pages(&server).await, 40);

    let quotes = read_quotes(&csv_path).unwrap();
    let texts: Vec<_> = quotes.iter().map(|q| q.text.clone()).collect();
    assert_eq!(texts, expected_texts(1..=23, 3));
    assert_eq!(quotes[4].author, "Author 2");
    assert_eq!(quotes[4].tags, vec!["page-2", "n1"]);

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("text,author,tags\n"));
}

#[tokio::test]
async fn test_not_found_ends_listing() {
    let server = MockServer::start().await;
    mount_listing(&server, 4, 2).await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, 10, &dir.path().join("quotes.csv"));

    let (quotes, stats) = harvest(&config).await.unwrap();

    assert_eq!(quotes.len(), 8);
    assert_eq!(stats.rounds, 2);
    assert_eq!(stats.pages_requested, 20);
}

#[tokio::test]
async fn test_server_error_page_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_pages(&server, [1, 2, 4, 5], 2).await;
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&server, 3, &dir.path().join("quotes.csv"));

    let (quotes, stats) = harvest(&config).await.unwrap();

    let texts: Vec<_> = quotes.iter().map(|q| q.text.clone()).collect();
    assert_eq!(texts, expected_texts([1, 2, 4, 5], 2));
    assert_eq!(stats.pages_with_quotes, 4);
    assert_eq!(stats.rounds, 3);
}

#[tokio::test]
async fn test_fetcher_reports_failure_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .respond_with(html(String::new()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.site.base_url = server.uri();
    let fetcher = HttpFetcher::new(&config).unwrap();

    // Present but empty is distinct from absent
    assert_eq!(fetcher.fetch_page(1).await, Some(Vec::new()));
    assert_eq!(fetcher.fetch_page(2).await, None);
    assert_eq!(fetcher.fetch_page(3).await, None);
}

#[tokio::test]
async fn test_broken_markup_aborts_without_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(html(
            r#"<div class="quote"><span class="text">orphan</span></div>"#.to_string(),
        ))
        .mount(&server)
        .await;
    mount_pages(&server, [1, 3], 1).await;
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("quotes.csv");
    let config = test_config(&server, 10, &csv_path);

    let err = run_with_config(&config).await.unwrap_err();

    assert!(matches!(
        err,
        HarvestError::Extract(ExtractError::MissingField {
            page: 2,
            field: "author",
            ..
        })
    ));
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_repeated_runs_write_identical_files() {
    let server = MockServer::start().await;
    mount_listing(&server, 7, 4).await;
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    run_with_config(&test_config(&server, 3, &first)).await.unwrap();
    run_with_config(&test_config(&server, 5, &second)).await.unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[tokio::test]
async fn test_config_file_drives_harvest() {
    let server = MockServer::start().await;
    for page in 1..=2u32 {
        Mock::given(method("GET"))
            .and(path("/listing"))
            .and(query_param("page", page.to_string()))
            .respond_with(html(format!(
                r#"<ul><li class="entry"><q>line {page}</q><cite>poet</cite><em>verse</em></li></ul>"#
            )))
            .mount(&server)
            .await;
    }
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("out").join("verses.csv");
    let config_text = format!(
        r#"
[site]
base-url = "{}"
page-path = "/listing?page={{page}}"

[selectors]
item = "li.entry"
text = "q"
author = "cite"
tag = "em"

[crawler]
batch-size = 2
request-timeout-secs = 5

[output]
csv-path = "{}"
"#,
        server.uri(),
        csv_path.display()
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config_text.as_bytes()).unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).unwrap();
    let stats = run_with_config(&config).await.unwrap();

    assert_eq!(stats.quotes_written, 2);
    let quotes = read_quotes(&csv_path).unwrap();
    assert_eq!(quotes[0].text, "line 1");
    assert_eq!(quotes[1].text, "line 2");
    assert_eq!(quotes[1].author, "poet");
    assert_eq!(quotes[1].tags, vec!["verse"]);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_non_utf8_output_path_written_as_given() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let server = MockServer::start().await;
    mount_listing(&server, 1, 2).await;
    mount_empty_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join(OsStr::from_bytes(b"q\xff.csv"));
    let config = test_config(&server, 10, &csv_path);

    let stats = run_with_config(&config).await.unwrap();

    assert_eq!(stats.output_path, csv_path);
    assert_eq!(read_quotes(&csv_path).unwrap().len(), 2);
    let lossy = dir.path().join("q\u{fffd}.csv");
    assert!(!lossy.exists());
}
