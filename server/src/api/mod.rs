pub mod body;
pub mod ingredients;
pub mod public;
pub mod recipes;

use crate::catalog::{CatalogError, ValidationErrors};
use crate::AppState;
use axum::extract::MatchedPath;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler-level failure, converted into an HTTP response at the boundary.
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    Invalid(ValidationErrors),
    /// A request body that could not be read as a JSON object.
    Rejected(StatusCode, String),
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(entity) => ApiError::NotFound(entity),
            CatalogError::Invalid(errors) => ApiError::Invalid(errors),
            CatalogError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        ApiError::Internal(format!("Database connection failed: {err}"))
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            ApiError::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Validation failed: {errors}"),
            ),
            ApiError::Rejected(status, message) => (status, message),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Generate the complete OpenAPI document by merging every module's paths
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base document with shared components and security
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Pantry", description = "Recipe catalog API"),
        components(schemas(ErrorResponse, ValidationErrors))
    )]
    struct BaseApi;

    let mut doc = BaseApi::openapi();

    // Add security scheme
    if let Some(components) = doc.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's document
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        public::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
    ];

    for module_doc in modules {
        // Merge paths
        doc.paths.paths.extend(module_doc.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_doc.components {
            if let Some(doc_components) = doc.components.as_mut() {
                doc_components.schemas.extend(module_components.schemas);
            }
        }
    }

    doc
}

/// Builds the full application: resource routes, auth routes, API docs and
/// request tracing.
pub fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi());

    Router::new()
        .merge(public::router())
        .merge(recipes::router(&state))
        .merge(ingredients::router(&state))
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}
