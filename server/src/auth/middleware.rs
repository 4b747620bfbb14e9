use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::db::get_user_from_token;
use super::extractor::{bearer_token, AuthError};

/// Middleware that requires a valid auth token.
///
/// On success the resolved user is stored in the request extensions so that
/// [`super::AuthUser`] does not hit the database a second time.
pub async fn require_auth(
    State(pool): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = {
        let token = match bearer_token(request.headers()) {
            Ok(t) => t,
            Err(e) => return e.into_response(),
        };

        match get_user_from_token(&pool, token).await {
            Ok(Some(user)) => user,
            Ok(None) => return AuthError::InvalidToken.into_response(),
            Err(e) => {
                tracing::error!("Session lookup failed: {}", e);
                return AuthError::Unavailable.into_response();
            }
        }
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}
