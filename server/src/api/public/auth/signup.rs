use crate::api::ErrorResponse;
use crate::auth::{create_session, create_user, hash_password};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: i32,
    pub token: String,
}

fn error(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"username": "user", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> impl IntoResponse {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return error(
            StatusCode::BAD_REQUEST,
            "Username and password cannot be empty",
        );
    }

    let mut conn = match pool.get() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to get DB connection: {}", e);
            return error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection failed",
            );
        }
    };

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(_) => return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password"),
    };

    let user = match create_user(&mut conn, username, &password_hash) {
        Ok(u) => u,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => return error(StatusCode::CONFLICT, "Username already exists"),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user");
        }
    };

    let token = match create_session(&mut conn, user.id) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session");
        }
    };

    tracing::info!(user_id = user.id, "user signed up");

    (
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            token,
        }),
    )
        .into_response()
}
