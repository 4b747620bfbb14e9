//! Form payloads for the new/edit actions and for re-rendering after a
//! failed create or update.

use crate::api::ApiError;
use crate::catalog::{ingredients, ValidationErrors};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::SqliteConnection;
use serde::Serialize;
use utoipa::ToSchema;

use super::get::IngredientSummary;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct RecipeForm {
    pub name: String,
    pub ingredient_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeFormResponse {
    /// Set when the form edits an existing recipe
    pub id: Option<i32>,
    pub recipe: RecipeForm,
    /// Ingredients available for selection
    pub ingredients: Vec<IngredientSummary>,
    pub errors: ValidationErrors,
}

pub fn render(
    conn: &mut SqliteConnection,
    id: Option<i32>,
    recipe: RecipeForm,
    errors: ValidationErrors,
    status: StatusCode,
) -> Result<Response, ApiError> {
    let ingredients = ingredients::find_all(conn)?
        .into_iter()
        .map(IngredientSummary::from)
        .collect();

    Ok((
        status,
        Json(RecipeFormResponse {
            id,
            recipe,
            ingredients,
            errors,
        }),
    )
        .into_response())
}
