//! End-to-end scrape tests against a mock HTTP server

use page_harvest::config::FetcherConfig;
use page_harvest::{HarvestError, Harvester, ScrapedData};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTACT_PAGE: &str = include_str!("../fixtures/contact_page.html");

async fn serve_contact_page(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CONTACT_PAGE)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(mock_server)
        .await;
}

fn harvester() -> Harvester {
    Harvester::new(&FetcherConfig::default()).expect("Failed to build harvester")
}

#[tokio::test]
async fn test_scrape_contact_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    serve_contact_page(&mock_server).await;

    let data = harvester().scrape(&format!("{}/contact", base_url)).await;

    assert_eq!(data.title, "Acme Widgets");
    assert_eq!(data.description, "Widgets for every workshop");
    assert_eq!(data.emails, vec!["sales@acme.test", "support@acme.test"]);
    assert_eq!(data.phone_numbers, vec!["+1-415-555-0132", "(415) 555-0199"]);

    assert_eq!(data.social_links.len(), 3);
    assert_eq!(
        data.social_links.get("twitter").map(String::as_str),
        Some("https://twitter.com/acmewidgets")
    );
    assert_eq!(
        data.social_links.get("linkedin").map(String::as_str),
        Some("https://www.linkedin.com/company/acme")
    );
    assert_eq!(
        data.social_links.get("github").map(String::as_str),
        Some("https://github.com/acme")
    );
    assert!(!data.social_links.contains_key("facebook"));

    assert_eq!(
        data.images,
        vec![
            format!("{}/images/logo.png", base_url),
            "https://cdn.acme.test/photos/team.jpg".to_string(),
        ]
    );
    assert_eq!(
        data.videos,
        vec![
            format!("{}/media/intro.mp4", base_url),
            "https://www.youtube.com/embed/abc123".to_string(),
        ]
    );
    assert_eq!(data.documents, vec![format!("{}/files/catalog.pdf", base_url)]);
}

#[tokio::test]
async fn test_scrape_is_deterministic() {
    let mock_server = MockServer::start().await;
    serve_contact_page(&mock_server).await;

    let url = format!("{}/contact", mock_server.uri());
    let harvester = harvester();
    let first = harvester.scrape(&url).await;
    let second = harvester.scrape(&url).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_scrape_json_shape() {
    let mock_server = MockServer::start().await;
    serve_contact_page(&mock_server).await;

    let data = harvester()
        .scrape(&format!("{}/contact", mock_server.uri()))
        .await;
    let json = serde_json::to_value(&data).unwrap();

    for key in [
        "title",
        "description",
        "emails",
        "phoneNumbers",
        "socialLinks",
        "images",
        "videos",
        "documents",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/team/page"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Team</title></head>
            <body><a href="brochure.pdf">Brochure</a></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let data = harvester().scrape(&format!("{}/old", base_url)).await;

    assert_eq!(data.title, "Team");
    assert_eq!(data.documents, vec![format!("{}/team/brochure.pdf", base_url)]);
}

#[tokio::test]
async fn test_server_error_yields_empty_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let data = harvester()
        .scrape(&format!("{}/contact", mock_server.uri()))
        .await;

    assert_eq!(data, ScrapedData::default());
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_try_scrape_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = harvester()
        .try_scrape(&format!("{}/contact", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(HarvestError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_try_scrape_rejects_non_http_scheme() {
    let result = harvester().try_scrape("ftp://files.acme.test/").await;
    assert!(matches!(result, Err(HarvestError::UrlError(_))));
}

#[tokio::test]
async fn test_redirect_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;

    let result = harvester()
        .try_scrape(&format!("{}/loop", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(HarvestError::RedirectLimit { .. })));
}

#[tokio::test]
async fn test_page_without_contact_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>Nothing here</p></body></html>"),
        )
        .mount(&mock_server)
        .await;

    let data = harvester()
        .try_scrape(&format!("{}/", mock_server.uri()))
        .await
        .expect("page should be fetched");

    assert!(data.is_empty());
}
