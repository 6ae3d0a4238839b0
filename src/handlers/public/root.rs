use axum::Json;
use serde_json::{json, Value};

use crate::app::BLOG_PREFIX;

/// GET / - service name, version and route map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Blog API (Rust)",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "create": format!("POST {} (protected)", BLOG_PREFIX),
            "update": format!("PUT {} (protected)", BLOG_PREFIX),
            "bulk": format!("GET {}/bulk (protected)", BLOG_PREFIX),
            "show": format!("GET {}/:id (protected)", BLOG_PREFIX),
        }
    }))
}
