use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::ValidationErrors;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::form::{self, RecipeForm, RecipeFormResponse};

#[utoipa::path(
    get,
    path = "/recipes/new",
    tag = "recipes",
    responses(
        (status = 200, description = "Empty recipe form", body = RecipeFormResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn new_recipe(
    AuthUser(_user): AuthUser,
    State(pool): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    form::render(
        &mut conn,
        None,
        RecipeForm::default(),
        ValidationErrors::default(),
        StatusCode::OK,
    )
}
