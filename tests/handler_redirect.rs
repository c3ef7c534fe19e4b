mod common;

use common::{TestOptions, spawn_app, spawn_app_with};
use std::sync::atomic::Ordering;
use uuid::Uuid;

#[tokio::test]
async fn test_redirect_known_code() {
    let mut app = spawn_app();
    app.repo
        .seed(Uuid::new_v4(), "abc123", "https://example.com/very/long/url", 0);

    let response = app.server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header("location"),
        "https://example.com/very/long/url"
    );

    let event = app.clicks.try_recv().unwrap();
    assert_eq!(event.short_code, "abc123");
}

#[tokio::test]
async fn test_redirect_unknown_code_goes_home() {
    let mut app = spawn_app();

    let response = app.server.get("/nope42").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/");
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_lookup_error_goes_home() {
    let mut app = spawn_app();
    app.repo.seed(Uuid::new_v4(), "abc123", "https://example.com", 0);
    app.repo.fail_queries.store(true, Ordering::SeqCst);

    let response = app.server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/");
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_when_click_queue_full() {
    let mut app = spawn_app_with(TestOptions {
        click_queue_capacity: 1,
        ..Default::default()
    });
    app.repo.seed(Uuid::new_v4(), "abc123", "https://example.com", 0);

    app.server.get("/abc123").await;
    let response = app.server.get("/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com");

    assert!(app.clicks.try_recv().is_ok());
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_does_not_require_session() {
    let app = spawn_app();
    app.repo.seed(Uuid::new_v4(), "my-link", "https://example.org", 0);

    let response = app.server.get("/my-link").await;

    assert_eq!(response.header("location"), "https://example.org");
}

#[tokio::test]
async fn test_redirect_never_sends_invalid_location() {
    let mut app = spawn_app();
    app.repo
        .seed(Uuid::new_v4(), "broken", "https://example.com/a\r\nb", 0);

    let response = app.server.get("/broken").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "/");
    assert!(app.clicks.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_keeps_non_ascii_url() {
    let mut app = spawn_app();
    app.repo
        .seed(Uuid::new_v4(), "cafe42", "https://example.com/café", 0);

    let response = app.server.get("/cafe42").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.header("location").as_bytes(),
        "https://example.com/café".as_bytes()
    );
    assert!(app.clicks.try_recv().is_ok());
}
