//! News page fetching and article extraction.
//!
//! Each supported site has a submodule implementing [`ExtractionRule`]:
//!
//! | Site | Module | Content region | Clutter removed |
//! |------|--------|----------------|-----------------|
//! | Setopati | [`setopati`] | first `.editor-box` | `.insert-ad`, `.media`, `.ad-item`, `script`, `style` |
//! | Gorkhapatra | [`gorkhapatra`] | longest `.blog-details` | `.share-buttons`, `.ads`, `.meta`, `script`, `style` |
//! | anything else | (here) | `<body>` | nothing |
//!
//! A page is fetched once with a desktop browser User-Agent. There are no
//! retries; every failure is returned as a [`ScrapeError`] for the caller to
//! report before it moves on to the next URL.

pub mod gorkhapatra;
pub mod setopati;

use crate::models::{Extracted, Site};
use crate::utils::{detach_matching, joined_text, truncate_for_log};
use ego_tree::NodeId;
use gorkhapatra::Gorkhapatra;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use setopati::Setopati;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Sent with every request so the sites serve their regular desktop markup.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Pages exercised when no URL is given on the command line.
pub const DEFAULT_TEST_URLS: [&str; 2] = [
    "https://www.setopati.com/social/379513",
    "https://gorkhapatraonline.com/news/186978",
];

/// Printed before the body dump of a page no rule recognizes.
pub const UNRECOGNIZED_NOTICE: &str =
    "Domain not recognized for specific extraction. Dumping raw body text.";

const DIVIDER: &str = "----------------------------------------";

static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Why a single page produced no article text.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Connection failures, non-2xx statuses and unreadable bodies.
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("Could not find content container.")]
    MissingContent,
}

/// Per-site choice of content region and of the clutter stripped from it.
pub trait ExtractionRule {
    /// The element holding the article, if the page has one.
    fn select_region(&self, document: &Html) -> Option<NodeId>;

    /// Descendants of the region to drop before reading text.
    fn clutter(&self) -> Option<&Selector>;
}

/// Fallback for unrecognized sites: the whole body, nothing removed.
pub struct Body;

impl ExtractionRule for Body {
    fn select_region(&self, document: &Html) -> Option<NodeId> {
        document.select(&BODY).next().map(|el| el.id())
    }

    fn clutter(&self) -> Option<&Selector> {
        None
    }
}

fn rule_for(site: Site) -> &'static dyn ExtractionRule {
    match site {
        Site::Setopati => &Setopati,
        Site::Gorkhapatra => &Gorkhapatra,
        Site::Unknown => &Body,
    }
}

/// Apply `site`'s rule to a page and return the cleaned text, or `None` when
/// the page has no content region.
pub fn extract(site: Site, html: &str) -> Option<String> {
    let rule = rule_for(site);
    let mut document = Html::parse_document(html);
    let region = rule.select_region(&document)?;

    if let Some(clutter) = rule.clutter() {
        detach_matching(&mut document, region, clutter);
    }

    let element = document.tree.get(region).and_then(ElementRef::wrap)?;
    Some(joined_text(element, "\n\n"))
}

/// Build the HTTP client used for every page.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Fetch `url` and extract its article with the rule matching its host.
pub async fn scrape(client: &Client, url: &str) -> Result<Extracted, ScrapeError> {
    let url = Url::parse(url)?;
    let site = Site::from_url(&url);
    scrape_page(client, &url, site).await
}

/// Fetch `url` and extract its article with an explicit rule.
#[instrument(level = "info", skip_all, fields(url = %url, site = %site))]
pub async fn scrape_page(client: &Client, url: &Url, site: Site) -> Result<Extracted, ScrapeError> {
    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let html = response.text().await?;
    debug!(bytes = html.len(), preview = %truncate_for_log(&html, 200), "Fetched page");

    match extract(site, &html) {
        Some(text) => {
            info!(chars = text.chars().count(), "Extracted article text");
            Ok(Extracted { site, text })
        }
        None => {
            warn!("Page has no content container");
            Err(ScrapeError::MissingContent)
        }
    }
}

/// Section banner printed before each page is tried.
pub fn banner(index: usize, site: Site) -> String {
    let lead = if index == 0 { "" } else { "\n\n" };
    format!("{lead}>>> Testing {site} Logic...")
}

/// Render one page's outcome the way the tester prints it.
///
/// Either the whole article block or a single error line, never both.
pub fn render(result: &Result<Extracted, ScrapeError>) -> String {
    match result {
        Ok(extracted) => {
            let mut out = String::new();
            if extracted.site == Site::Unknown {
                out.push_str(UNRECOGNIZED_NOTICE);
                out.push('\n');
            }
            let label = extracted.site.label().unwrap_or_default();
            out.push_str(&format!(
                "\n--- extracted content from {label} ---\n\n{}\n\n{DIVIDER}\n\n",
                extracted.text
            ));
            out
        }
        Err(e @ ScrapeError::MissingContent) => format!("Error: {e}\n"),
        Err(e) => format!("Error fetching URL: {e}\n"),
    }
}

/// Try each URL in turn, writing banner, fetch line and outcome to `out`.
///
/// A failing page is reported and skipped; every URL is attempted. Only a
/// failure to write to `out` ends the run early.
#[instrument(level = "info", skip_all, fields(count = urls.len()))]
pub async fn run_page_tests<W: Write>(
    client: &Client,
    urls: &[String],
    out: &mut W,
) -> std::io::Result<Vec<Result<Extracted, ScrapeError>>> {
    let start_time = std::time::Instant::now();
    let mut results = Vec::with_capacity(urls.len());

    for (index, url) in urls.iter().enumerate() {
        let site = Url::parse(url)
            .map(|parsed| Site::from_url(&parsed))
            .unwrap_or(Site::Unknown);
        writeln!(out, "{}", banner(index, site))?;
        writeln!(out, "Fetching: {url}")?;
        out.flush()?;

        let result = scrape(client, url).await;
        if let Err(e) = &result {
            warn!(%url, %site, error = %e, "Page test failed");
        }
        out.write_all(render(&result).as_bytes())?;
        results.push(result);
    }

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let elapsed = start_time.elapsed();
    info!(
        total = results.len(),
        succeeded,
        failed = results.len() - succeeded,
        ?elapsed,
        "Scraper test complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SETOPATI_PAGE: &str = r#"
        <html><body>
          <h1>Headline</h1>
          <div class="editor-box">
            <p>Paragraph one.</p>
            <div class="insert-ad">Ad</div>
            <p>Paragraph two.</p>
          </div>
        </body></html>"#;

    #[test]
    fn test_unknown_site_uses_whole_body() {
        let html = r#"<html><head><title>T</title></head><body>
            <p>Intro</p><div class="ads">Kept</div><div class="insert-ad">Also kept</div>
        </body></html>"#;
        assert_eq!(
            extract(Site::Unknown, html).as_deref(),
            Some("Intro\n\nKept\n\nAlso kept")
        );
    }

    #[test]
    fn test_unknown_site_skips_script_text() {
        let html = "<body><p>Visible</p><script>hidden()</script></body>";
        assert_eq!(extract(Site::Unknown, html).as_deref(), Some("Visible"));
    }

    #[test]
    fn test_render_success_block() {
        let result = Ok(Extracted {
            site: Site::Setopati,
            text: "Hello\n\nWorld".to_string(),
        });
        assert_eq!(
            render(&result),
            "\n--- extracted content from Setopati ---\n\nHello\n\nWorld\n\n\
             ----------------------------------------\n\n"
        );
    }

    #[test]
    fn test_render_unknown_site_has_notice_and_empty_label() {
        let result = Ok(Extracted {
            site: Site::Unknown,
            text: "Body".to_string(),
        });
        let out = render(&result);
        assert!(out.starts_with(&format!("{UNRECOGNIZED_NOTICE}\n")));
        assert!(out.contains("--- extracted content from  ---"));
    }

    #[test]
    fn test_render_missing_content() {
        let result = Err(ScrapeError::MissingContent);
        assert_eq!(render(&result), "Error: Could not find content container.\n");
    }

    #[test]
    fn test_banners() {
        assert_eq!(banner(0, Site::Setopati), ">>> Testing Setopati Logic...");
        assert_eq!(
            banner(1, Site::Gorkhapatra),
            "\n\n>>> Testing Gorkhapatra Logic..."
        );
        assert_eq!(banner(2, Site::Unknown), "\n\n>>> Testing Generic Logic...");
    }

    #[tokio::test]
    async fn test_scrape_page_sends_user_agent_and_extracts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social/379513"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SETOPATI_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let url = Url::parse(&format!("{}/social/379513", server.uri())).unwrap();
        let extracted = scrape_page(&client, &url, Site::Setopati).await.unwrap();

        assert_eq!(extracted.site, Site::Setopati);
        assert_eq!(extracted.text, "Paragraph one.\n\nParagraph two.");

        let requests = server.received_requests().await.unwrap();
        let agent = requests[0].headers.get("user-agent").unwrap();
        assert_eq!(agent.to_str().unwrap(), USER_AGENT);
    }

    #[tokio::test]
    async fn test_missing_container_is_reported_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>No article</p>"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let result = scrape_page(&client, &url, Site::Gorkhapatra).await;

        assert!(matches!(result, Err(ScrapeError::MissingContent)));
    }

    #[tokio::test]
    async fn test_not_found_is_a_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let result = scrape(&client, &format!("{}/news/186978", server.uri())).await;

        assert!(matches!(result, Err(ScrapeError::Request(_))));
        let line = render(&result);
        assert!(line.starts_with("Error fetching URL: "));
        assert!(line.contains("404"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_request_error() {
        let client = build_client().unwrap();
        let result = scrape(&client, "http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(ScrapeError::Request(_))));
        assert!(render(&result).starts_with("Error fetching URL: "));
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let client = build_client().unwrap();
        let result = scrape(&client, "not a url").await;
        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
        assert!(render(&result).starts_with("Error fetching URL: "));
    }

    #[tokio::test]
    async fn test_unrecognized_host_falls_back_to_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SETOPATI_PAGE))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let extracted = scrape(&client, &server.uri()).await.unwrap();

        assert_eq!(extracted.site, Site::Unknown);
        assert_eq!(
            extracted.text,
            "Headline\n\nParagraph one.\n\nAd\n\nParagraph two."
        );
        assert!(render(&Ok(extracted)).starts_with(UNRECOGNIZED_NOTICE));
    }

    #[tokio::test]
    async fn test_run_continues_past_a_failed_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/404"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/social/379513"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SETOPATI_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let urls = vec![
            format!("{}/news/404", server.uri()),
            format!("{}/social/379513", server.uri()),
        ];
        let mut out = Vec::new();
        let results = run_page_tests(&client, &urls, &mut out).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(ScrapeError::Request(_))));
        assert!(results[1].is_ok());

        let out = String::from_utf8(out).unwrap();
        let first_banner = out.find(">>> Testing Generic Logic...").unwrap();
        let failure = out.find("Error fetching URL: ").unwrap();
        let second_banner = out.find("\n\n>>> Testing Generic Logic...").unwrap();
        let second_fetch = out.find(&format!("Fetching: {}", urls[1])).unwrap();
        let article = out.find("Paragraph one.\n\nAd\n\nParagraph two.").unwrap();
        assert!(first_banner < failure);
        assert!(failure < second_banner);
        assert!(second_banner < second_fetch);
        assert!(second_fetch < article);
        assert!(out.ends_with("----------------------------------------\n\n"));
    }

    #[tokio::test]
    async fn test_run_with_every_page_failing_still_reports_each() {
        let client = build_client().unwrap();
        let urls = vec!["not a url".to_string(), "http://127.0.0.1:1/".to_string()];
        let mut out = Vec::new();

        let results = run_page_tests(&client, &urls, &mut out).await.unwrap();

        assert!(results.iter().all(|r| r.is_err()));
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Error fetching URL: ").count(), 2);
        assert!(out.contains("Fetching: http://127.0.0.1:1/"));
    }
}
