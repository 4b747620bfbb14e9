use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::catalog::ValidationErrors;
use axum::{http::StatusCode, response::IntoResponse};

use super::form::{self, IngredientForm, IngredientFormResponse};

#[utoipa::path(
    get,
    path = "/ingredients/new",
    tag = "ingredients",
    responses(
        (status = 200, description = "Empty ingredient form", body = IngredientFormResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn new_ingredient(AuthUser(_user): AuthUser) -> impl IntoResponse {
    form::render(
        None,
        IngredientForm::default(),
        ValidationErrors::default(),
        StatusCode::OK,
    )
}
