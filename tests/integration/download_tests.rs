//! Media download tests against a mock HTTP server

use page_harvest::config::FetcherConfig;
use page_harvest::download::{
    build_download_client, download_media_with_config, download_urls, FILE_ALREADY_EXISTS, FILE_TYPE_NOT_ALLOWED,
};
use page_harvest::{download_media, MediaDownloadOptions, ScrapedData};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_MB: usize = 2 * 1024 * 1024;

fn options_in(dir: &TempDir) -> MediaDownloadOptions {
    MediaDownloadOptions {
        destination: dir.path().to_path_buf(),
        ..MediaDownloadOptions::default()
    }
}

/// Mounts HEAD and GET handlers for a small PNG-like file
async fn serve_file(mock_server: &MockServer, file_path: &str, body: &[u8]) {
    Mock::given(method("HEAD"))
        .and(path(file_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .insert_header("content-length", body.len().to_string().as_str()),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(body.to_vec()),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_results_follow_input_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    serve_file(&mock_server, "/ok.png", b"PNGDATA").await;

    let urls = vec![
        format!("{}/setup.exe", base_url),
        format!("{}/missing.png", base_url),
        format!("{}/ok.png", base_url),
    ];

    let client = build_download_client(&FetcherConfig::default()).unwrap();
    let results = download_urls(&client, &urls, &options_in(&dir)).await;

    assert_eq!(results.len(), 3);
    for (result, url) in results.iter().zip(&urls) {
        assert_eq!(&result.url, url);
    }

    assert!(!results[0].success);
    assert_eq!(results[0].error.as_deref(), Some(FILE_TYPE_NOT_ALLOWED));

    assert!(!results[1].success);
    assert!(results[1].error.as_deref().unwrap().contains("404"));
    assert!(results[1].file_path.is_none());

    assert!(results[2].success);
    assert_eq!(results[2].error, None);
    assert_eq!(results[2].file_size, Some(7));
    assert_eq!(results[2].file_name.as_deref(), Some("ok.png"));
    let saved = results[2].file_path.as_ref().unwrap();
    assert_eq!(saved, &dir.path().join("ok.png"));
    assert_eq!(std::fs::read(saved).unwrap(), b"PNGDATA");
}

#[tokio::test]
async fn test_declared_size_over_limit() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .and(path("/big.mp4"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .insert_header("content-length", TWO_MB.to_string().as_str())
                .set_body_bytes(vec![0u8; TWO_MB]),
        )
        .mount(&mock_server)
        .await;

    // The body must never be requested
    Mock::given(method("GET"))
        .and(path("/big.mp4"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let options = MediaDownloadOptions {
        max_file_size_mb: 1,
        ..options_in(&dir)
    };
    let data = ScrapedData {
        videos: vec![format!("{}/big.mp4", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options).await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(
        results[0].error.as_deref(),
        Some("File too large: 2.00MB (max 1MB)")
    );
    assert!(!dir.path().join("big.mp4").exists());
}

#[tokio::test]
async fn test_existing_file_is_skipped() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("photo.png");
    std::fs::write(&existing, b"original").unwrap();

    Mock::given(method("HEAD"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"replacement".to_vec()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let data = ScrapedData {
        images: vec![format!("{}/photo.png", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options_in(&dir)).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert!(results[0].is_skipped());
    assert_eq!(results[0].error.as_deref(), Some(FILE_ALREADY_EXISTS));
    assert_eq!(results[0].file_size, Some(8));
    assert_eq!(results[0].file_path.as_ref(), Some(&existing));
    assert_eq!(std::fs::read(&existing).unwrap(), b"original");
}

#[tokio::test]
async fn test_head_not_allowed_falls_back_to_get() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .and(path("/docs/report.pdf"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let data = ScrapedData {
        documents: vec![format!("{}/docs/report.pdf", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options_in(&dir)).await;

    assert!(results[0].success);
    assert_eq!(results[0].file_size, Some(8));
    assert_eq!(
        std::fs::read(dir.path().join("report.pdf")).unwrap(),
        b"%PDF-1.4"
    );
}

#[tokio::test]
async fn test_oversized_stream_is_aborted_and_removed() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .and(path("/clip.webm"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clip.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; TWO_MB]))
        .mount(&mock_server)
        .await;

    let options = MediaDownloadOptions {
        max_file_size_mb: 1,
        ..options_in(&dir)
    };
    let data = ScrapedData {
        videos: vec![format!("{}/clip.webm", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options).await;

    // The GET response declares its length, so the message reports it
    assert!(!results[0].success);
    assert_eq!(
        results[0].error.as_deref(),
        Some("File too large: 2.00MB (max 1MB)")
    );
    assert!(!dir.path().join("clip.webm").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Sorted names of everything in the destination directory
fn dir_entries(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_same_name_downloads_publish_one_complete_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a/x.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"SLOW-COPY".to_vec())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b/x.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"FAST".to_vec()))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/a/x.png", base_url),
        format!("{}/b/x.png", base_url),
    ];
    let client = build_download_client(&FetcherConfig::default()).unwrap();
    let results = download_urls(&client, &urls, &options_in(&dir)).await;

    // The fast download publishes first; the slow one finds the name taken
    assert!(results[1].success);
    assert_eq!(results[1].error, None);
    assert_eq!(results[1].file_size, Some(4));

    assert!(results[0].success);
    assert!(results[0].is_skipped());
    assert_eq!(results[0].file_size, Some(4));

    assert_eq!(std::fs::read(dir.path().join("x.png")).unwrap(), b"FAST");
    assert_eq!(dir_entries(&dir), vec!["x.png"]);
}

#[tokio::test]
async fn test_failed_download_does_not_remove_sibling_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    // Starts first and fails after the sibling has begun
    Mock::given(method("GET"))
        .and(path("/a/x.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![1u8; TWO_MB])
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b/x.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"COMPLETE".to_vec())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/a/x.png", base_url),
        format!("{}/b/x.png", base_url),
    ];
    let options = MediaDownloadOptions {
        max_file_size_mb: 1,
        ..options_in(&dir)
    };
    let client = build_download_client(&FetcherConfig::default()).unwrap();
    let results = download_urls(&client, &urls, &options).await;

    assert!(!results[0].success);
    assert!(results[1].success);
    assert!(!results[1].is_skipped());
    assert_eq!(std::fs::read(dir.path().join("x.png")).unwrap(), b"COMPLETE");
    assert_eq!(dir_entries(&dir), vec!["x.png"]);
}

#[tokio::test]
async fn test_destination_directory_is_created() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("media").join("acme");
    serve_file(&mock_server, "/logo.png", b"LOGO").await;

    let options = MediaDownloadOptions {
        destination: nested.clone(),
        ..MediaDownloadOptions::default()
    };
    let data = ScrapedData {
        images: vec![format!("{}/logo.png", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options).await;

    assert!(results[0].success);
    assert!(nested.is_dir());
    assert_eq!(std::fs::read(nested.join("logo.png")).unwrap(), b"LOGO");
}

#[tokio::test]
async fn test_media_order_and_cross_field_duplicates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    let data = ScrapedData {
        images: vec![format!("{}/a.exe", base_url)],
        videos: vec![format!("{}/b.exe", base_url)],
        documents: vec![
            format!("{}/c.exe", base_url),
            format!("{}/a.exe", base_url),
        ],
        ..ScrapedData::default()
    };

    let results = download_media(&data, &options_in(&dir)).await;

    let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/a.exe", base_url),
            format!("{}/b.exe", base_url),
            format!("{}/c.exe", base_url),
            format!("{}/a.exe", base_url),
        ]
    );
    assert!(results
        .iter()
        .all(|r| r.error.as_deref() == Some(FILE_TYPE_NOT_ALLOWED)));
}

#[tokio::test]
async fn test_concurrency_limit_serializes_downloads() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"IMG".to_vec())
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..4).map(|i| format!("{}/img{}.png", base_url, i)).collect();
    let options = MediaDownloadOptions {
        max_concurrent_downloads: 1,
        ..options_in(&dir)
    };

    let client = build_download_client(&FetcherConfig::default()).unwrap();
    let start = Instant::now();
    let results = download_urls(&client, &urls, &options).await;

    assert!(start.elapsed() >= Duration::from_millis(600));
    assert!(results.iter().all(|r| r.success));
    for i in 0..4 {
        assert!(dir.path().join(format!("img{}.png", i)).exists());
    }
}

#[tokio::test]
async fn test_empty_media_list() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("never-created");
    let options = MediaDownloadOptions {
        destination: nested.clone(),
        ..MediaDownloadOptions::default()
    };

    let results = download_media(&ScrapedData::default(), &options).await;

    assert!(results.is_empty());
    assert!(!nested.exists());
}

#[tokio::test]
async fn test_media_requests_use_configured_user_agent() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("HEAD"))
        .and(header("user-agent", "MediaBot/2.0"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(header("user-agent", "MediaBot/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNG".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = FetcherConfig {
        user_agent: "MediaBot/2.0".to_string(),
        ..FetcherConfig::default()
    };
    let data = ScrapedData {
        images: vec![format!("{}/logo.png", mock_server.uri())],
        ..ScrapedData::default()
    };

    let results = download_media_with_config(&data, &options_in(&dir), &fetcher).await;

    assert!(results[0].success);
    assert_eq!(std::fs::read(dir.path().join("logo.png")).unwrap(), b"PNG");
}
