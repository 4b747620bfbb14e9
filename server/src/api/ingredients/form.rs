use crate::catalog::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct IngredientForm {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientFormResponse {
    /// Set when the form edits an existing ingredient
    pub id: Option<i32>,
    pub ingredient: IngredientForm,
    pub errors: ValidationErrors,
}

pub fn render(
    id: Option<i32>,
    ingredient: IngredientForm,
    errors: ValidationErrors,
    status: StatusCode,
) -> Response {
    (
        status,
        Json(IngredientFormResponse {
            id,
            ingredient,
            errors,
        }),
    )
        .into_response()
}
