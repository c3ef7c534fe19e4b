mod common;

use common::{session_cookie, set_cookies, spawn_app};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::Ordering;

fn credentials(email: &str, password: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("email", email.to_string()),
        ("password", password.to_string()),
    ])
}

#[tokio::test]
async fn test_auth_page_renders_sign_in() {
    let app = spawn_app();

    let response = app.server.get("/auth").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("/auth/sign-in"));
    assert!(html.contains("Create one"));
}

#[tokio::test]
async fn test_auth_page_renders_sign_up() {
    let app = spawn_app();

    let response = app.server.get("/auth?mode=signup").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("/auth/sign-up"));
    assert!(html.contains("Create an account"));
}

#[tokio::test]
async fn test_auth_page_redirects_signed_in_user() {
    let app = spawn_app();
    let session = app.auth.signed_in("ana@example.com");

    let response = app
        .server
        .get("/auth")
        .add_header("Cookie", session_cookie(&session))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_sign_in_sets_cookies() {
    let app = spawn_app();
    app.auth.register("ana@example.com");

    let response = app
        .server
        .post("/auth/sign-in")
        .form(&credentials("ana@example.com", "secret123"))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly") && c.contains("SameSite=Lax")));
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = spawn_app();
    app.auth.register("ana@example.com");

    let response = app
        .server
        .post("/auth/sign-in")
        .form(&credentials("ana@example.com", "wrong-password"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(response.text().contains("Invalid login credentials"));
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_sign_in_validation() {
    let app = spawn_app();

    let response = app
        .server
        .post("/auth/sign-in")
        .form(&credentials("not-an-email", "secret123"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.text().contains("Please enter a valid email address"));

    let response = app
        .server
        .post("/auth/sign-in")
        .form(&credentials("ana@example.com", "123"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.text().contains("Password must be at least 6 characters"));
}

#[tokio::test]
async fn test_sign_up_with_immediate_session() {
    let app = spawn_app();

    let response = app
        .server
        .post("/auth/sign-up")
        .form(&credentials("new@example.com", "secret123"))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
    assert_eq!(set_cookies(&response).len(), 2);
}

#[tokio::test]
async fn test_sign_up_requiring_confirmation() {
    let app = spawn_app();
    app.auth.require_confirmation.store(true, Ordering::SeqCst);

    let response = app
        .server
        .post("/auth/sign-up")
        .form(&credentials("new@example.com", "secret123"))
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Check your email to confirm it"));
    assert!(html.contains("/auth/sign-in"));
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_sign_up_existing_account() {
    let app = spawn_app();
    app.auth.register("ana@example.com");

    let response = app
        .server
        .post("/auth/sign-up")
        .form(&credentials("ana@example.com", "secret123"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.text().contains("User already registered"));
}

#[tokio::test]
async fn test_logout_clears_cookies() {
    let app = spawn_app();
    let session = app.auth.signed_in("ana@example.com");

    let response = app
        .server
        .post("/logout")
        .add_header("Cookie", session_cookie(&session))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Signed out");

    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=;")));

    let response = app
        .server
        .get("/")
        .add_header("Cookie", format!("sb-access-token={}", session.access_token))
        .await;
    assert_eq!(response.status_code(), 303);
}

#[tokio::test]
async fn test_logout_failure_keeps_session() {
    let app = spawn_app();
    app.auth.fail_sign_out.store(true, Ordering::SeqCst);
    let session = app.auth.signed_in("ana@example.com");

    let response = app
        .server
        .post("/logout")
        .add_header("Cookie", session_cookie(&session))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Failed to sign out"
    );
    assert!(set_cookies(&response).is_empty());
}
