use crate::api::body::FormBody;
use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::catalog::ingredients::{self, IngredientParams};
use crate::catalog::{CatalogError, ValidationErrors};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use utoipa::ToSchema;

use super::form::{self, IngredientForm, IngredientFormResponse};
use super::get::IngredientResponse;

#[derive(Debug, Clone, Default, ToSchema)]
pub struct CreateIngredientRequest {
    pub name: String,
}

impl CreateIngredientRequest {
    fn read(body: &FormBody, errors: &mut ValidationErrors) -> Self {
        Self {
            name: body.field("name", errors).unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/ingredients",
    tag = "ingredients",
    request_body(content = CreateIngredientRequest, example = json!({"name": "basil"})),
    responses(
        (status = 201, description = "Ingredient created; Location points at it", body = IngredientResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Form re-rendered with field errors", body = IngredientFormResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    body: FormBody,
) -> Result<Response, ApiError> {
    let mut conn = pool.get()?;

    let mut errors = ValidationErrors::default();
    let request = CreateIngredientRequest::read(&body, &mut errors);
    let params = IngredientParams { name: request.name };

    let created = errors
        .into_result()
        .and_then(|()| ingredients::create(&mut conn, &params));

    match created {
        Ok(ingredient) => {
            let id = ingredient.id;
            tracing::info!(ingredient_id = id, user_id = user.id, "ingredient created");
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, format!("/ingredients/{id}"))],
                Json(IngredientResponse::from(ingredient)),
            )
                .into_response())
        }
        Err(CatalogError::Invalid(errors)) => Ok(form::render(
            None,
            IngredientForm { name: params.name },
            errors,
            StatusCode::UNPROCESSABLE_ENTITY,
        )),
        Err(e) => Err(e.into()),
    }
}
