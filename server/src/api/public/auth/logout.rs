use crate::api::{ApiError, ErrorResponse};
use crate::auth::{bearer_token, delete_session, AuthUser};
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    // AuthUser already validated the header, so the token is present.
    if let Ok(token) = bearer_token(&headers) {
        delete_session(&mut conn, token)?;
    }

    tracing::info!(user_id = user.id, "user logged out");
    Ok(StatusCode::NO_CONTENT)
}
