use crate::api::body::FormBody;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::recipes::{self, RecipeChanges};
use crate::catalog::{CatalogError, ValidationErrors};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use utoipa::ToSchema;

use super::form::{self, RecipeForm, RecipeFormResponse};
use super::get::RecipeResponse;

/// Omitted fields keep their stored value. A present `ingredient_ids`
/// replaces the recipe's whole ingredient set.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub ingredient_ids: Option<Vec<i32>>,
}

impl UpdateRecipeRequest {
    fn read(body: &FormBody, errors: &mut ValidationErrors) -> Self {
        Self {
            name: body.field("name", errors),
            ingredient_ids: body.field("ingredient_ids", errors),
        }
    }
}

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Edit form re-rendered with field errors", body = RecipeFormResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<i32>,
    body: FormBody,
) -> Result<Response, ApiError> {
    let mut conn = pool.get()?;

    let mut errors = ValidationErrors::default();
    let request = UpdateRecipeRequest::read(&body, &mut errors);
    let changes = RecipeChanges {
        name: request.name,
        ingredient_ids: request.ingredient_ids,
    };

    let updated = errors
        .into_result()
        .and_then(|()| recipes::update(&mut conn, id, &changes));

    match updated {
        Ok(detail) => {
            tracing::info!(recipe_id = id, user_id = user.id, "recipe updated");
            Ok(Json(RecipeResponse::from(detail)).into_response())
        }
        Err(CatalogError::Invalid(errors)) => {
            let current = recipes::find_by_id(&mut conn, id)?;
            let recipe = RecipeForm {
                ingredient_ids: changes
                    .ingredient_ids
                    .unwrap_or_else(|| current.ingredient_ids()),
                name: changes.name.unwrap_or(current.recipe.name),
            };
            form::render(
                &mut conn,
                Some(id),
                recipe,
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(e) => Err(e.into()),
    }
}
