use crate::api::{ApiError, ErrorResponse};
use crate::catalog::{ingredients, IngredientDetail};
use crate::models::{Ingredient, Recipe};
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
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            created_at: ingredient.created_at,
            updated_at: ingredient.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientDetailResponse {
    #[serde(flatten)]
    pub ingredient: IngredientResponse,
    /// Recipes that use this ingredient
    pub recipes: Vec<RecipeSummary>,
}

impl From<IngredientDetail> for IngredientDetailResponse {
    fn from(detail: IngredientDetail) -> Self {
        Self {
            ingredient: detail.ingredient.into(),
            recipes: detail.recipes.into_iter().map(RecipeSummary::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient and the recipes using it", body = IngredientDetailResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(pool): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = pool.get()?;
    let detail = ingredients::find_by_id(&mut conn, id)?;
    Ok(Json(IngredientDetailResponse::from(detail)))
}
