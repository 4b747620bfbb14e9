use crate::api::{ApiError, ErrorResponse};
use crate::catalog::{recipes, RecipeDetail};
use crate::models::Ingredient;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientSummary {
    pub id: i32,
    pub name: String,
}

impl From<Ingredient> for IngredientSummary {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub name: String,
    /// User who created the recipe, if any
    pub user_id: Option<i32>,
    pub ingredients: Vec<IngredientSummary>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<RecipeDetail> for RecipeResponse {
    fn from(detail: RecipeDetail) -> Self {
        let RecipeDetail {
            recipe,
            ingredients,
        } = detail;
        Self {
            id: recipe.id,
            name: recipe.name,
            user_id: recipe.user_id,
            ingredients: ingredients.into_iter().map(IngredientSummary::from).collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let detail = recipes::find_by_id(&mut conn, id)?;
    Ok(Json(RecipeResponse::from(detail)))
}
