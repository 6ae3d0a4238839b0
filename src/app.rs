use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{JwtError, TokenAuthenticator};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::PostStore;
use crate::handlers::{blog, public};
use crate::middleware::jwt_auth_middleware;

/// Mount point of the blog routes
pub const BLOG_PREFIX: &str = "/api/v1/blog";

/// State shared by every request. Immutable; the store owns its own pooling.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub authenticator: Arc<TokenAuthenticator>,
    pub enforce_post_ownership: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, authenticator: TokenAuthenticator) -> Self {
        Self {
            store,
            authenticator: Arc::new(authenticator),
            enforce_post_ownership: false,
        }
    }

    pub fn from_config(store: Arc<dyn PostStore>, security: &SecurityConfig) -> Result<Self, JwtError> {
        let authenticator = TokenAuthenticator::new(&security.jwt_secret)?
            .with_bearer_prefix(security.accept_bearer_prefix);
        Ok(Self::new(store, authenticator).with_post_ownership(security.enforce_post_ownership))
    }

    /// Restrict updates to the post's own author
    pub fn with_post_ownership(mut self, enforce: bool) -> Self {
        self.enforce_post_ownership = enforce;
        self
    }
}

/// Routes only, without the configurable HTTP layers
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .nest(BLOG_PREFIX, blog_routes(state.clone()))
        .with_state(state)
}

/// Full application: routes plus body limit, CORS and request tracing
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut app = router(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn blog_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(blog::post_create).put(blog::post_update))
        .route("/bulk", get(blog::post_bulk))
        .route("/:id", get(blog::post_get))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
