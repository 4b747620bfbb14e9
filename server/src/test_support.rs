//! Fixtures shared by the unit tests: a throwaway SQLite database with the
//! migrations applied, plus helpers for driving the router in-process.

use crate::auth::{create_session, create_user, hash_password};
use crate::db::{create_pool, DbPool};
use crate::models::User;
use crate::AppState;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestDb {
    pub pool: AppState,
    _dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pantry-test.db");
        let pool: DbPool = create_pool(path.to_str().unwrap()).unwrap();
        Self {
            pool: Arc::new(pool),
            _dir: dir,
        }
    }

    pub fn conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().unwrap()
    }

    pub fn app(&self) -> Router {
        crate::api::app(self.pool.clone())
    }

    /// Creates a user with password "password" and returns it along with a
    /// fresh session token.
    pub fn user_with_session(&self, username: &str) -> (User, String) {
        let mut conn = self.conn();
        let hash = hash_password("password").unwrap();
        let user = create_user(&mut conn, username, &hash).unwrap();
        let token = create_session(&mut conn, user.id).unwrap();
        (user, token)
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Sends one request through `app`. `body` is encoded as JSON when present.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
