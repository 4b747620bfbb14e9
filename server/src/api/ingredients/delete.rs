use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::ingredients;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    delete,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted and unlinked from every recipe"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    ingredients::destroy(&mut conn, id)?;

    tracing::info!(ingredient_id = id, user_id = user.id, "ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}
