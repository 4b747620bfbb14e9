pub mod auth;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for session endpoints (signup and login need no auth;
/// logout authenticates through its own token)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup::signup))
        .route("/auth/login", post(auth::login::login))
        .route("/auth/logout", post(auth::logout::logout))
}

#[derive(OpenApi)]
#[openapi(
    paths(auth::login::login, auth::signup::signup, auth::logout::logout),
    components(schemas(
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        auth::signup::SignupRequest,
        auth::signup::SignupResponse,
    ))
)]
pub struct ApiDoc;
