//! Integration test harness for the Armour storefront.
//!
//! [`TestApp`] drives the full router in process: the in-memory storage
//! backend (or [`FailingStorage`]), an in-memory session store and a
//! [`RecordingNotifier`] in place of SMTP. Requests go through `tower::ServiceExt::oneshot`, and the session
//! cookie is carried from one response to the next request like a browser
//! would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p armour-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used, clippy::expect_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use armour_core::{Email, ReviewId};
use armour_storefront::catalog::Catalog;
use armour_storefront::config::{RateLimitConfig, StorageBackend, StorefrontConfig};
use armour_storefront::db::{
    ContactStore, MemoryStorage, RepositoryError, ReviewStore, Storage, UserStore,
};
use armour_storefront::middleware::session::SESSION_COOKIE_NAME;
use armour_storefront::models::{ContactMessage, NewContactMessage, NewReview, Review, User};
use armour_storefront::services::email::{Notifier, NotifyError};
use armour_storefront::state::AppState;

/// Password that satisfies registration rules.
pub const TEST_PASSWORD: &str = "hunter2-but-longer";

/// Config for tests: memory backend, no SMTP, a bucket too large to drain.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        backend: StorageBackend::Memory,
        database_url: None,
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        session_secret: SecretString::from("kT9#vW2$qL7!mZ4&xR8*pN3^bH6@cJ1%fD5"),
        auth_rate_limit: RateLimitConfig {
            per_second: 1,
            burst_size: 10_000,
        },
        email: None,
        sentry_dsn: None,
        sentry_environment: None,
        log_json: false,
    }
}

/// Notifier that remembers every review it was asked to confirm.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Review>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose every send fails after recording the attempt.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    /// Reviews a confirmation was attempted for, in order.
    pub fn sent(&self) -> Vec<Review> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_review_confirmation(&self, review: &Review) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(review.clone());
        if self.fail {
            Err(NotifyError::InvalidAddress(review.email.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Storage whose every call fails, as an unreachable database would.
#[derive(Debug, Default)]
pub struct FailingStorage;

fn offline() -> RepositoryError {
    RepositoryError::DataCorruption("storage offline".to_owned())
}

#[async_trait]
impl UserStore for FailingStorage {
    async fn create_user(
        &self,
        _name: &str,
        _email: &Email,
        _password_hash: &str,
    ) -> Result<User, RepositoryError> {
        Err(offline())
    }

    async fn get_password_hash(
        &self,
        _email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl ReviewStore for FailingStorage {
    async fn create_review(&self, _review: &NewReview) -> Result<Review, RepositoryError> {
        Err(offline())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        Err(offline())
    }

    async fn list_reviews_for_product(
        &self,
        _product_id: &str,
    ) -> Result<Vec<Review>, RepositoryError> {
        Err(offline())
    }

    async fn delete_review(&self, _id: ReviewId) -> Result<bool, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl ContactStore for FailingStorage {
    async fn create_message(
        &self,
        _message: &NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        Err(offline())
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

/// A response with its body read into memory.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// The storefront router plus a cookie jar holding one session cookie.
pub struct TestApp {
    router: Router,
    storage: Option<Arc<MemoryStorage>>,
    notifier: Arc<RecordingNotifier>,
    cookie: Option<String>,
}

impl TestApp {
    /// App with a notifier that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default())
    }

    #[must_use]
    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = Self::build(Arc::clone(&storage) as Arc<dyn Storage>, notifier);
        app.storage = Some(storage);
        app
    }

    /// App whose storage rejects every call.
    #[must_use]
    pub fn with_failing_storage() -> Self {
        Self::build(Arc::new(FailingStorage), RecordingNotifier::default())
    }

    fn build(storage: Arc<dyn Storage>, notifier: RecordingNotifier) -> Self {
        let notifier = Arc::new(notifier);
        let catalog = Catalog::load().expect("embedded catalog loads");

        let state = AppState::new(
            test_config(),
            catalog,
            storage,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        let router = armour_storefront::app(state, MemoryStore::default());

        Self {
            router,
            storage: None,
            notifier,
            cookie: None,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &MemoryStorage {
        self.storage
            .as_deref()
            .expect("app is backed by memory storage")
    }

    #[must_use]
    pub fn notifier(&self) -> &RecordingNotifier {
        &self.notifier
    }

    /// Forget the session cookie, as a fresh browser would.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    pub async fn post_json(&mut self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    /// Register and log in; the session cookie is kept for later requests.
    pub async fn sign_in(&mut self, name: &str, email: &str) {
        let registered = self
            .post_form(
                "/register",
                &[("name", name), ("email", email), ("password", TEST_PASSWORD)],
            )
            .await;
        assert_eq!(registered.status, StatusCode::SEE_OTHER, "{}", registered.body);

        let logged_in = self
            .post_form("/login", &[("email", email), ("password", TEST_PASSWORD)])
            .await;
        assert_eq!(logged_in.location(), Some("/"), "{}", logged_in.body);
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        self.store_cookie(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(pair) = value.split(';').next() else { continue };
            if !pair.starts_with(&prefix) {
                continue;
            }
            // Removal cookies carry an empty value
            self.cookie = (pair.len() > prefix.len()).then(|| pair.to_owned());
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
