//! Shared application state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::{SigningSecret, TokenService};
use crate::db::DbPool;

/// Shared application state. Built once at startup; clones share the pool and keys.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: DbPool, secret: &SigningSecret) -> Self {
        Self {
            db,
            tokens: TokenService::new(secret),
        }
    }

    pub fn db(&self) -> &DbPool {
        &self.db
    }
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "quill" })),
    )
}
