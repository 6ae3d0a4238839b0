#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use blog_api_rust::auth::{Subject, TokenAuthenticator};
use blog_api_rust::database::models::{Author, NewPost, Post, PostSummary, PostUpdate};
use blog_api_rust::database::{DatabaseError, InMemoryPostStore, PostStore};
use blog_api_rust::{router, AppState, BLOG_PREFIX};

pub const SECRET: &str = "integration-test-secret";
pub const ADA: i32 = 1;
pub const GRACE: i32 = 2;

/// In-memory store that counts every call made through `PostStore`
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryPostStore,
    calls: AtomicUsize,
    ping_fails: AtomicBool,
}

impl RecordingStore {
    pub fn seeded() -> Self {
        Self {
            inner: InMemoryPostStore::with_authors([
                Author { id: ADA, name: Some("Ada Lovelace".to_string()) },
                Author { id: GRACE, name: Some("Grace Hopper".to_string()) },
            ]),
            calls: AtomicUsize::new(0),
            ping_fails: AtomicBool::new(false),
        }
    }

    /// Make every later `ping` fail as if the pool timed out
    pub fn fail_pings(&self) {
        self.ping_fails.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryPostStore {
        &self.inner
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PostStore for RecordingStore {
    async fn create(&self, post: NewPost) -> Result<Post, DatabaseError> {
        self.record();
        self.inner.create(post).await
    }

    async fn update(&self, update: PostUpdate) -> Result<Post, DatabaseError> {
        self.record();
        self.inner.update(update).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PostSummary>, DatabaseError> {
        self.record();
        self.inner.find_by_id(id).await
    }

    async fn find_many(&self) -> Result<Vec<PostSummary>, DatabaseError> {
        self.record();
        self.inner.find_many().await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.record();
        if self.ping_fails.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        self.inner.ping().await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {}", e, self.text))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<RecordingStore>,
    pub authenticator: TokenAuthenticator,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ownership(false)
    }

    pub fn with_ownership(enforce: bool) -> Self {
        let store = Arc::new(RecordingStore::seeded());
        let authenticator = TokenAuthenticator::new(SECRET).expect("secret");
        let state = AppState::new(store.clone(), authenticator.clone()).with_post_ownership(enforce);

        Self {
            router: router(state),
            store,
            authenticator,
        }
    }

    pub fn token_for(&self, subject: impl Into<Subject>) -> String {
        self.authenticator.issue(subject.into(), None).expect("token")
    }

    pub fn blog_path(path: &str) -> String {
        format!("{}{}", BLOG_PREFIX, path)
    }

    /// Send a request with an optional raw `authorization` value and JSON body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let raw = body.map(|b| b.to_string());
        self.send_raw(method, path, token, raw, true).await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<String>,
        json_content_type: bool,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        if json_content_type && body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        TestResponse {
            status,
            text: String::from_utf8(bytes.to_vec()).expect("utf8 body"),
        }
    }

    /// Create a post as `author` and return its id
    pub async fn create_post(&self, author: i32, title: &str, content: &str) -> i32 {
        let token = self.token_for(author);
        let res = self
            .send(
                Method::POST,
                BLOG_PREFIX,
                Some(&token),
                Some(serde_json::json!({ "title": title, "content": content })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.text);
        res.json()["id"].as_i64().expect("id") as i32
    }
}
