use crate::api::body::FormBody;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::ingredients::{self, IngredientParams};
use crate::catalog::{CatalogError, ValidationErrors};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use utoipa::ToSchema;

use super::form::{self, IngredientForm, IngredientFormResponse};
use super::get::IngredientResponse;

/// An omitted name keeps the stored one.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct UpdateIngredientRequest {
    pub name: Option<String>,
}

impl UpdateIngredientRequest {
    fn read(body: &FormBody, errors: &mut ValidationErrors) -> Self {
        Self {
            name: body.field("name", errors),
        }
    }
}

#[utoipa::path(
    put,
    path = "/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i32, Path, description = "Ingredient ID")
    ),
    request_body = UpdateIngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated successfully", body = IngredientResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Edit form re-rendered with field errors", body = IngredientFormResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<i32>,
    body: FormBody,
) -> Result<Response, ApiError> {
    let mut conn = pool.get()?;

    let mut errors = ValidationErrors::default();
    let request = UpdateIngredientRequest::read(&body, &mut errors);

    let updated = errors.into_result().and_then(|()| {
        let name = match &request.name {
            Some(name) => name.clone(),
            None => ingredients::find_by_id(&mut conn, id)?.ingredient.name,
        };
        ingredients::update(&mut conn, id, &IngredientParams { name })
    });

    match updated {
        Ok(ingredient) => {
            tracing::info!(ingredient_id = id, user_id = user.id, "ingredient updated");
            Ok(Json(IngredientResponse::from(ingredient)).into_response())
        }
        Err(CatalogError::Invalid(errors)) => {
            // An unknown id is a 404 even when the name is also invalid.
            let current = ingredients::find_by_id(&mut conn, id)?;
            Ok(form::render(
                Some(id),
                IngredientForm {
                    name: request.name.unwrap_or(current.ingredient.name),
                },
                errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            ))
        }
        Err(e) => Err(e.into()),
    }
}
