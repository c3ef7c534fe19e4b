#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use linksnap::application::services::{AuthService, UrlService};
use linksnap::domain::click_event::ClickEvent;
use linksnap::domain::entities::{AuthUser, NewShortUrl, Session, ShortUrl};
use linksnap::domain::repositories::{AuthProvider, UrlRepository};
use linksnap::error::AppError;
use linksnap::infrastructure::notifications::UrlEventBus;
use linksnap::routes;
use linksnap::state::AppState;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;
use uuid::Uuid;

pub const HOST: &str = "s.example.com";

/// In-memory stand-in for the `urls` table and its database functions.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<Vec<ShortUrl>>,
    generated: AtomicUsize,
    pub increments: Mutex<Vec<String>>,
    pub fail_queries: AtomicBool,
}

impl InMemoryUrlRepository {
    fn check(&self) -> Result<(), AppError> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }

    /// Seeds a row directly, bypassing the service rules.
    pub fn seed(&self, user_id: Uuid, short_code: &str, original_url: &str, clicks: i64) -> ShortUrl {
        let row = ShortUrl {
            id: Uuid::new_v4(),
            user_id,
            original_url: original_url.to_string(),
            short_code: short_code.to_string(),
            clicks,
            created_at: Utc::now() - Duration::minutes(self.len() as i64),
            is_custom: false,
        };
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get_by_code(&self, short_code: &str) -> Option<ShortUrl> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.short_code == short_code)
            .cloned()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<ShortUrl>, AppError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        self.check()?;
        Ok(self.get_by_code(short_code))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, AppError> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        self.check()?;
        Ok(self.get_by_code(short_code).map(|r| r.original_url))
    }

    async fn generate_short_code(&self) -> Result<String, AppError> {
        self.check()?;
        let n = self.generated.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("gen{:03}", n))
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|r| r.short_code == new_url.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_code_key" }),
            ));
        }
        if rows.iter().any(|r| r.user_id == new_url.user_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_user_id_key" }),
            ));
        }

        let row = ShortUrl {
            id: Uuid::new_v4(),
            user_id: new_url.user_id,
            original_url: new_url.original_url,
            short_code: new_url.short_code,
            clicks: 0,
            created_at: Utc::now(),
            is_custom: new_url.is_custom,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortUrl>, AppError> {
        self.check()?;
        let mut rows: Vec<ShortUrl> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn clicks_by_user(&self, user_id: Uuid) -> Result<Vec<i64>, AppError> {
        Ok(self
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|r| r.clicks)
            .collect())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(rows.len() < before)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError> {
        self.check()?;
        if let Some(row) = self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.short_code == short_code)
        {
            row.clicks += 1;
        }
        self.increments
            .lock()
            .unwrap()
            .push(short_code.to_string());
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// Fake GoTrue: accounts, access tokens and refresh tokens kept in memory.
#[derive(Default)]
pub struct FakeAuthProvider {
    accounts: Mutex<HashMap<String, (String, AuthUser)>>,
    access: Mutex<HashMap<String, AuthUser>>,
    refresh: Mutex<HashMap<String, AuthUser>>,
    pub require_confirmation: AtomicBool,
    pub fail_sign_out: AtomicBool,
}

impl FakeAuthProvider {
    fn issue(&self, user: &AuthUser) -> Session {
        let access_token = format!("access-{}", Uuid::new_v4());
        let refresh_token = format!("refresh-{}", Uuid::new_v4());

        self.access
            .lock()
            .unwrap()
            .insert(access_token.clone(), user.clone());
        self.refresh
            .lock()
            .unwrap()
            .insert(refresh_token.clone(), user.clone());

        Session {
            access_token,
            refresh_token,
            expires_in: Some(3600),
            user: user.clone(),
        }
    }

    /// Registers an account with password `secret123`.
    pub fn register(&self, email: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), ("secret123".to_string(), user.clone()));
        user
    }

    /// Registers an account and returns a live session for it.
    pub fn signed_in(&self, email: &str) -> Session {
        let user = self.register(email);
        self.issue(&user)
    }

    /// Invalidates an access token, as if it had expired.
    pub fn expire(&self, access_token: &str) {
        self.access.lock().unwrap().remove(access_token);
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let user = self
            .accounts
            .lock()
            .unwrap()
            .get(email)
            .filter(|(pw, _)| pw == password)
            .map(|(_, user)| user.clone())
            .ok_or_else(|| AppError::unauthorized("Invalid login credentials", json!({})))?;

        Ok(self.issue(&user))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AppError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AppError::bad_request("User already registered", json!({})));
        }

        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user.clone()));

        if self.require_confirmation.load(Ordering::SeqCst) {
            return Ok(None);
        }

        Ok(Some(self.issue(&user)))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AppError> {
        self.access
            .lock()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::unauthorized("invalid JWT", json!({})))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError> {
        let user = self
            .refresh
            .lock()
            .unwrap()
            .remove(refresh_token)
            .ok_or_else(|| AppError::unauthorized("Invalid Refresh Token", json!({})))?;

        Ok(self.issue(&user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AppError::internal("Auth service unavailable", json!({})));
        }
        self.access.lock().unwrap().remove(access_token);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<InMemoryUrlRepository>,
    pub auth: Arc<FakeAuthProvider>,
    pub clicks: mpsc::Receiver<ClickEvent>,
    pub events: UrlEventBus,
}

pub struct TestOptions {
    pub click_queue_capacity: usize,
    pub public_base_url: Option<String>,
    pub behind_proxy: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            click_queue_capacity: 100,
            public_base_url: None,
            behind_proxy: false,
        }
    }
}

pub fn create_test_state(
    repo: Arc<InMemoryUrlRepository>,
    auth: Arc<FakeAuthProvider>,
    options: TestOptions,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(options.click_queue_capacity);
    let events = UrlEventBus::default();

    let state = AppState {
        url_service: Arc::new(UrlService::new(repo, events.clone())),
        auth_service: Arc::new(AuthService::new(auth)),
        click_sender: tx,
        events,
        public_base_url: options.public_base_url,
        trust_forwarded_headers: options.behind_proxy,
        cookie_secure: false,
    };

    (state, rx)
}

pub fn spawn_app_with(options: TestOptions) -> TestApp {
    let repo = Arc::new(InMemoryUrlRepository::default());
    let auth = Arc::new(FakeAuthProvider::default());
    let behind_proxy = options.behind_proxy;
    let (state, clicks) = create_test_state(repo.clone(), auth.clone(), options);
    let events = state.events.clone();

    let app: Router = routes::router(state, behind_proxy).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        repo,
        auth,
        clicks,
        events,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(TestOptions::default())
}

/// `Cookie` header value carrying a session.
pub fn session_cookie(session: &Session) -> String {
    format!(
        "sb-access-token={}; sb-refresh-token={}",
        session.access_token, session.refresh_token
    )
}

/// Values of all `Set-Cookie` headers on a response.
pub fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
