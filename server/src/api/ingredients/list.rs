use crate::api::ApiError;
use crate::catalog::ingredients;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::get::IngredientResponse;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientResponse>,
}

#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "ingredients",
    responses(
        (status = 200, description = "Every ingredient", body = ListIngredientsResponse)
    )
)]
pub async fn list_ingredients(
    State(pool): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let ingredients = ingredients::find_all(&mut conn)?;

    Ok(Json(ListIngredientsResponse {
        ingredients: ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    }))
}
