//! Recipe and ingredient persistence.
//!
//! Everything that reads or writes `recipes`, `ingredients` or the
//! `ingredients_recipes` join table goes through this module. Handlers and
//! the seed loader never touch those tables directly.

pub mod ingredients;
pub mod recipes;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

pub use ingredients::IngredientDetail;
pub use recipes::RecipeDetail;

pub const BLANK: &str = "can't be blank";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Field-level validation messages, keyed by request field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(())` when nothing was recorded, otherwise `CatalogError::Invalid`.
    pub fn into_result(self) -> Result<(), CatalogError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trims a required name, recording a blank error when nothing is left.
fn required_name<'a>(name: &'a str, errors: &mut ValidationErrors) -> &'a str {
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", BLANK);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::default();
        errors.add("name", BLANK);
        errors.add("ingredient_ids", "unknown ingredient id 7");
        assert_eq!(
            errors.to_string(),
            "ingredient_ids unknown ingredient id 7, name can't be blank"
        );
    }

    #[test]
    fn test_validation_errors_serialize_as_map() {
        let mut errors = ValidationErrors::default();
        errors.add("name", BLANK);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "name": ["can't be blank"] }));
    }

    #[test]
    fn test_required_name_trims() {
        let mut errors = ValidationErrors::default();
        assert_eq!(required_name("  Pizza ", &mut errors), "Pizza");
        assert!(errors.is_empty());

        assert_eq!(required_name("   ", &mut errors), "");
        assert_eq!(errors.field("name"), [BLANK]);
        assert!(errors.into_result().is_err());
    }
}
