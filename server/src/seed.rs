//! Destructive fixture loader behind `pantry seed`.
//!
//! Wipes every recipe and ingredient, then loads two recipes that share
//! ingredients. Running it again yields the same catalog (with fresh ids).

use crate::catalog::recipes::{self, RecipeParams};
use crate::catalog::CatalogError;
use crate::models::Recipe;
use crate::schema;
use diesel::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub recipes: usize,
    pub ingredients: usize,
    pub links: usize,
}

pub fn run(conn: &mut SqliteConnection) -> Result<SeedSummary, CatalogError> {
    conn.transaction(|conn| {
        recipes::destroy_all(conn)?;

        let pizza = insert_recipe(conn, "Pizza")?;
        let grilled_cheese = insert_recipe(conn, "grilled cheese")?;

        recipes::add_new_ingredient(conn, &grilled_cheese, "Pickles")?;

        recipes::add_new_ingredient(conn, &pizza, "tomato sauce")?;
        recipes::add_new_ingredient(conn, &pizza, "pepperoni")?;

        let cheese = recipes::add_new_ingredient(conn, &pizza, "cheese")?;
        let tomato = recipes::add_new_ingredient(conn, &pizza, "tomato")?;

        recipes::attach_ingredients(conn, &grilled_cheese, &[cheese, tomato])?;

        let summary = SeedSummary {
            recipes: schema::recipes::table
                .count()
                .get_result::<i64>(conn)? as usize,
            ingredients: schema::ingredients::table
                .count()
                .get_result::<i64>(conn)? as usize,
            links: schema::ingredients_recipes::table
                .count()
                .get_result::<i64>(conn)? as usize,
        };
        tracing::info!(
            recipes = summary.recipes,
            ingredients = summary.ingredients,
            links = summary.links,
            "seeded catalog"
        );
        Ok(summary)
    })
}

fn insert_recipe(conn: &mut SqliteConnection, name: &str) -> Result<Recipe, CatalogError> {
    let params = RecipeParams {
        name: name.to_string(),
        ingredient_ids: Vec::new(),
    };
    Ok(recipes::create(conn, &params, None)?.recipe)
}
