//! Integration tests for the walker
//!
//! These tests use wiremock to serve Wikipedia-shaped articles and run
//! full walks through the real HTTP fetcher.

use philosophy_walk::config::Config;
use philosophy_walk::title::PageId;
use philosophy_walk::walker::{HttpFetcher, NoDelay, Outcome, PageFetcher, Walker};
use philosophy_walk::{FetchError, LinkSelector};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.wiki.base_url = base_url.to_string();
    config.walk.min_delay_ms = 0;
    config.walk.max_delay_ms = 0;
    config.fetch.timeout_secs = 5;
    config.fetch.max_retries = 2;
    config.fetch.retry_delay_ms = 10; // Very short for testing
    config.user_agent.crawler_name = "TestWalker".to_string();
    config.user_agent.crawler_version = "1.0".to_string();
    config.user_agent.contact_url = "https://example.com/contact".to_string();
    config.user_agent.contact_email = "test@example.com".to_string();
    config
}

fn page(title: &str) -> PageId {
    PageId::parse(title).unwrap()
}

/// Wraps an article body in the page chrome Wikipedia serves around it
fn article(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title} - Wikipedia</title></head>
<body>
  <div id="mw-navigation">
    <a href="/wiki/Main_Page">Main page</a>
    <a href="/wiki/Special:Random">Random article</a>
  </div>
  <div id="content" class="mw-body">
    <h1 id="firstHeading">{title}</h1>
    <div id="bodyContent" class="mw-body-content">
      <div id="mw-content-text" class="mw-body-content">
        <div class="mw-parser-output">{body}</div>
      </div>
    </div>
  </div>
  <div id="footer"><a href="/wiki/Wikipedia:About">About Wikipedia</a></div>
</body></html>"#,
        title = title,
        body = body
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=UTF-8")
}

async fn mount_article(server: &MockServer, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", title)))
        .respond_with(html(article(title, body)))
        .mount(server)
        .await;
}

fn walker(config: &Config, budget: u32) -> Walker<HttpFetcher> {
    let fetcher = HttpFetcher::from_config(config).expect("Failed to build fetcher");
    Walker::new(
        fetcher,
        LinkSelector::new(config.disallowed_targets().unwrap()),
        config.target_page().unwrap(),
        budget,
    )
}

#[tokio::test]
async fn test_full_walk_reaches_philosophy() {
    let mock_server = MockServer::start().await;

    mount_article(
        &mock_server,
        "Sport",
        r#"<div role="note" class="hatnote">For other uses, see <a href="/wiki/Sport_(disambiguation)">Sport (disambiguation)</a>.</div>
        <table class="infobox"><tr><td><a href="/wiki/Olympic_Games">Olympics</a></td></tr></table>
        <p><b>Sport</b> (from <a href="/wiki/Old_French">Old French</a> <i>desport</i>)
        <i>is</i> <a href="/wiki/Help:IPA/English">/spɔːrt/</a> a form of
        <a href="/wiki/Physical_activity">physical activity</a> or <a href="/wiki/Game">game</a>.</p>"#,
    )
    .await;

    mount_article(
        &mock_server,
        "Physical_activity",
        r#"<p><i><a href="/wiki/Exercise">Exercise</a></i> aside, it is studied by
        <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
    )
    .await;

    // The target page itself is never fetched
    Mock::given(method("GET"))
        .and(path("/wiki/Philosophy"))
        .respond_with(html(article("Philosophy", "")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("Sport")).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::ReachedTarget {
            path: vec![page("Sport"), page("Physical activity"), page("Philosophy")]
        }
    );
}

#[tokio::test]
async fn test_walk_detects_cycle() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "A", r#"<p>See <a href="/wiki/B">B</a>.</p>"#).await;
    mount_article(
        &mock_server,
        "B",
        r#"<p><a href="/wiki/B">B</a> is like <a href="/wiki/A">A</a>.</p>"#,
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("A")).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::CycleDetected {
            path: vec![page("A"), page("B")],
            cycle_start: page("A"),
        }
    );
}

#[tokio::test]
async fn test_walk_without_eligible_link() {
    let mock_server = MockServer::start().await;

    mount_article(
        &mock_server,
        "Dead_end",
        r#"<p>Nothing here (except <a href="/wiki/Aside">an aside</a>) and
        <i><a href="/wiki/Italic">italics</a></i>, plus <a href="/wiki/Dead_end">itself</a>.</p>"#,
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("Dead end")).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::NoEligibleLink {
            path: vec![page("Dead end")],
            last_page: page("Dead end"),
        }
    );
}

#[tokio::test]
async fn test_walk_stops_at_budget() {
    let mock_server = MockServer::start().await;

    for (from, to) in [("P0", "P1"), ("P1", "P2"), ("P2", "P3"), ("P3", "P4")] {
        mount_article(
            &mock_server,
            from,
            &format!(r#"<p><a href="/wiki/{}">next</a></p>"#, to),
        )
        .await;
    }

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 3).run(page("P0")).await.unwrap();

    assert!(matches!(outcome, Outcome::BudgetExceeded { .. }));
    assert_eq!(outcome.path().len(), 4);

    // Three fetches: P0, P1, P2
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_missing_page_reports_partial_path() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Start", r#"<p><a href="/wiki/Gone">gone</a></p>"#).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let failure = walker(&config, 10).run(page("Start")).await.unwrap_err();

    assert_eq!(failure.page, page("Gone"));
    assert_eq!(failure.path, vec![page("Start"), page("Gone")]);
    assert_eq!(
        failure.source,
        FetchError::NotFound {
            page: "Gone".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mock_server = MockServer::start().await;

    // First request fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/wiki/Flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_article(&mock_server, "Flaky", r#"<p><a href="/wiki/Philosophy">p</a></p>"#).await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let content = fetcher.fetch(&page("Flaky")).await.unwrap();

    assert_eq!(content.links().count(), 1);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_errors_give_up_after_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Down"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3) // First attempt plus two retries
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let error = fetcher.fetch(&page("Down")).await.unwrap_err();

    assert_eq!(
        error,
        FetchError::Status {
            page: "Down".to_string(),
            status: 500
        }
    );
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Busy"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let error = fetcher.fetch(&page("Busy")).await.unwrap_err();

    assert!(matches!(error, FetchError::RateLimited { .. }));
}

#[tokio::test]
async fn test_non_html_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let error = fetcher.fetch(&page("Data")).await.unwrap_err();

    assert!(matches!(error, FetchError::NotHtml { .. }));
}

#[tokio::test]
async fn test_redirects_are_followed_by_fetcher() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Sports"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/wiki/Sport", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    mount_article(&mock_server, "Sport", r#"<p><a href="/wiki/Philosophy">p</a></p>"#).await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("Sports")).await.unwrap();

    // The path records the page the redirect landed on
    assert_eq!(
        outcome,
        Outcome::ReachedTarget {
            path: vec![page("Sport"), page("Philosophy")]
        }
    );
}

#[tokio::test]
async fn test_canonical_redirect_to_target_ends_walk() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Wisdom", r#"<p><a href="/wiki/Philosophical">p</a></p>"#).await;

    // MediaWiki serves soft redirects in place and names the target as canonical
    let redirected = format!(
        r#"<html><head><link rel="canonical" href="{}/wiki/Philosophy"></head>
        <body><p><a href="/wiki/Logic">logic</a></p></body></html>"#,
        mock_server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/wiki/Philosophical"))
        .respond_with(html(redirected))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("Wisdom")).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::ReachedTarget {
            path: vec![page("Wisdom"), page("Philosophy")]
        }
    );
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Polite"))
        .and(header(
            "user-agent",
            "TestWalker/1.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(html(article("Polite", "<p>No links.</p>")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = walker(&config, 10).run(page("Polite")).await.unwrap();

    assert_eq!(outcome.kind(), "no_eligible_link");
}

#[tokio::test]
async fn test_parallel_walks_are_independent() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Left", r#"<p><a href="/wiki/Philosophy">p</a></p>"#).await;
    mount_article(&mock_server, "Right", r#"<p><a href="/wiki/Middle">m</a></p>"#).await;
    mount_article(&mock_server, "Middle", r#"<p><a href="/wiki/Right">r</a></p>"#).await;

    let config = create_test_config(&mock_server.uri());
    let walker = std::sync::Arc::new(walker(&config, 10).with_wait(NoDelay));
    let results = walker
        .run_all(vec![page("Left"), page("Right")], true)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, page("Left"));
    assert!(results[0].1.as_ref().unwrap().is_success());
    assert_eq!(
        results[1].1.as_ref().unwrap(),
        &Outcome::CycleDetected {
            path: vec![page("Right"), page("Middle")],
            cycle_start: page("Right"),
        }
    );
}
