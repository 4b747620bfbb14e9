//! JSON request bodies for the create and update actions.
//!
//! Fields are read one at a time, so a value of the wrong type becomes a
//! validation error on that field and the form can be re-rendered. A body
//! that is not JSON at all is rejected with an [`ErrorResponse`] body.
//!
//! [`ErrorResponse`]: super::ErrorResponse

use super::ApiError;
use crate::catalog::ValidationErrors;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct FormBody(Map<String, Value>);

impl FormBody {
    /// Reads `name` as a `T`. An absent field is `None`. A present field that
    /// does not deserialize (null included) is recorded in `errors`.
    pub fn field<T: DeserializeOwned>(
        &self,
        name: &str,
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        let value = self.0.get(name)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.add(name, e.to_string());
                None
            }
        }
    }
}

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(fields))) => Ok(FormBody(fields)),
            Ok(Json(_)) => Err(ApiError::Rejected(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Request body must be a JSON object".to_string(),
            )),
            Err(rejection) => Err(ApiError::Rejected(
                rejection.status(),
                rejection.body_text(),
            )),
        }
    }
}
