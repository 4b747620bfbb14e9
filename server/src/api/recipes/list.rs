use crate::api::ApiError;
use crate::catalog::recipes;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::get::RecipeResponse;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "Every recipe with its ingredients", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(State(pool): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;

    // Not scoped to the caller: every viewer sees the whole catalog.
    let recipes = recipes::find_all(&mut conn)?;

    Ok(Json(ListRecipesResponse {
        recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "recipes",
    responses(
        (status = 200, description = "Site root; same as GET /recipes", body = ListRecipesResponse)
    )
)]
pub async fn root(state: State<AppState>) -> Result<impl IntoResponse, ApiError> {
    list_recipes(state).await
}
