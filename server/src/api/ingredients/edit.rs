use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::{ingredients, ValidationErrors};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::form::{self, IngredientForm, IngredientFormResponse};

#[utoipa::path(
    get,
    path = "/ingredients/{id}/edit",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient form pre-filled from the stored ingredient", body = IngredientFormResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn edit_ingredient(
    AuthUser(_user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let detail = ingredients::find_by_id(&mut conn, id)?;

    Ok(form::render(
        Some(id),
        IngredientForm {
            name: detail.ingredient.name,
        },
        ValidationErrors::default(),
        StatusCode::OK,
    ))
}
