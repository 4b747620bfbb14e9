use crate::api::body::FormBody;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::recipes::{self, RecipeParams};
use crate::catalog::{CatalogError, ValidationErrors};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use utoipa::ToSchema;

use super::form::{self, RecipeForm, RecipeFormResponse};
use super::get::RecipeResponse;

/// Only these fields are read; anything else in the body is ignored.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub ingredient_ids: Vec<i32>,
}

impl CreateRecipeRequest {
    fn read(body: &FormBody, errors: &mut ValidationErrors) -> Self {
        Self {
            name: body.field("name", errors).unwrap_or_default(),
            ingredient_ids: body.field("ingredient_ids", errors).unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body(content = CreateRecipeRequest, example = json!({"name": "Pizza", "ingredient_ids": [1, 2]})),
    responses(
        (status = 201, description = "Recipe created; Location points at the new recipe", body = RecipeResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Form re-rendered with field errors", body = RecipeFormResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    body: FormBody,
) -> Result<Response, ApiError> {
    let mut conn = pool.get()?;

    let mut errors = ValidationErrors::default();
    let request = CreateRecipeRequest::read(&body, &mut errors);
    let params = RecipeParams {
        name: request.name,
        ingredient_ids: request.ingredient_ids,
    };

    let created = errors
        .into_result()
        .and_then(|()| recipes::create(&mut conn, &params, Some(user.id)));

    match created {
        Ok(detail) => {
            let id = detail.recipe.id;
            tracing::info!(recipe_id = id, user_id = user.id, "recipe created");
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, format!("/recipes/{id}"))],
                Json(RecipeResponse::from(detail)),
            )
                .into_response())
        }
        Err(CatalogError::Invalid(errors)) => form::render(
            &mut conn,
            None,
            RecipeForm {
                name: params.name,
                ingredient_ids: params.ingredient_ids,
            },
            errors,
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(e) => Err(e.into()),
    }
}
