use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::{recipes, ValidationErrors};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::form::{self, RecipeForm, RecipeFormResponse};

#[utoipa::path(
    get,
    path = "/recipes/{id}/edit",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe form pre-filled from the stored recipe", body = RecipeFormResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn edit_recipe(
    AuthUser(_user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let detail = recipes::find_by_id(&mut conn, id)?;

    let recipe = RecipeForm {
        ingredient_ids: detail.ingredient_ids(),
        name: detail.recipe.name,
    };
    form::render(
        &mut conn,
        Some(id),
        recipe,
        ValidationErrors::default(),
        StatusCode::OK,
    )
}
