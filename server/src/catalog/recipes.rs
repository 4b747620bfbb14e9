use super::{required_name, CatalogError, ValidationErrors};
use crate::models::{Ingredient, NewIngredient, NewRecipe, Recipe, RecipeIngredient};
use crate::schema::{ingredients, ingredients_recipes, recipes};
use diesel::prelude::*;
use std::collections::BTreeSet;

/// A recipe together with its associated ingredients (ordered by id).
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

impl RecipeDetail {
    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|i| i.id).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeParams {
    pub name: String,
    pub ingredient_ids: Vec<i32>,
}

/// Partial update. `None` leaves the field untouched; `Some` ingredient ids
/// replace the whole ingredient set.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub ingredient_ids: Option<Vec<i32>>,
}

pub fn find_all(conn: &mut SqliteConnection) -> Result<Vec<RecipeDetail>, CatalogError> {
    let all: Vec<Recipe> = recipes::table
        .order(recipes::id.asc())
        .select(Recipe::as_select())
        .load(conn)?;

    let links: Vec<(RecipeIngredient, Ingredient)> = RecipeIngredient::belonging_to(&all)
        .inner_join(ingredients::table)
        .order(ingredients::id.asc())
        .select((RecipeIngredient::as_select(), Ingredient::as_select()))
        .load(conn)?;

    Ok(links
        .grouped_by(&all)
        .into_iter()
        .zip(all)
        .map(|(links, recipe)| RecipeDetail {
            recipe,
            ingredients: links.into_iter().map(|(_, ingredient)| ingredient).collect(),
        })
        .collect())
}

pub fn find_by_id(conn: &mut SqliteConnection, id: i32) -> Result<RecipeDetail, CatalogError> {
    let recipe: Recipe = recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(CatalogError::NotFound("Recipe"))?;

    let ingredients = ingredients_of(conn, &recipe)?;

    Ok(RecipeDetail {
        recipe,
        ingredients,
    })
}

fn ingredients_of(
    conn: &mut SqliteConnection,
    recipe: &Recipe,
) -> Result<Vec<Ingredient>, CatalogError> {
    Ok(RecipeIngredient::belonging_to(recipe)
        .inner_join(ingredients::table)
        .order(ingredients::id.asc())
        .select(Ingredient::as_select())
        .load(conn)?)
}

/// Creates a recipe owned by `owner` and links the given ingredients.
///
/// Every id in `ingredient_ids` must exist; unknown ids are reported on the
/// `ingredient_ids` field and nothing is written.
pub fn create(
    conn: &mut SqliteConnection,
    params: &RecipeParams,
    owner: Option<i32>,
) -> Result<RecipeDetail, CatalogError> {
    conn.transaction(|conn| {
        let mut errors = ValidationErrors::default();
        let name = required_name(&params.name, &mut errors);
        let ingredients = resolve_ingredients(conn, &params.ingredient_ids, &mut errors)?;
        errors.into_result()?;

        let recipe: Recipe = diesel::insert_into(recipes::table)
            .values(&NewRecipe {
                name,
                user_id: owner,
            })
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        attach_ingredients(conn, &recipe, &ingredients)?;

        Ok(RecipeDetail {
            recipe,
            ingredients,
        })
    })
}

/// Links `ingredients` to `recipe`. Pairs that are already linked are left
/// alone. Returns the number of join rows actually inserted.
pub fn attach_ingredients(
    conn: &mut SqliteConnection,
    recipe: &Recipe,
    ingredients: &[Ingredient],
) -> Result<usize, CatalogError> {
    let mut inserted = 0;
    for ingredient in ingredients {
        inserted += diesel::insert_or_ignore_into(ingredients_recipes::table)
            .values(RecipeIngredient {
                recipe_id: recipe.id,
                ingredient_id: ingredient.id,
            })
            .execute(conn)?;
    }
    Ok(inserted)
}

/// Creates a new ingredient and links it to `recipe` in one step.
pub fn add_new_ingredient(
    conn: &mut SqliteConnection,
    recipe: &Recipe,
    name: &str,
) -> Result<Ingredient, CatalogError> {
    conn.transaction(|conn| {
        let mut errors = ValidationErrors::default();
        let name = required_name(name, &mut errors);
        errors.into_result()?;

        let ingredient: Ingredient = diesel::insert_into(ingredients::table)
            .values(&NewIngredient { name })
            .returning(Ingredient::as_returning())
            .get_result(conn)?;

        attach_ingredients(conn, recipe, std::slice::from_ref(&ingredient))?;
        Ok(ingredient)
    })
}

pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    changes: &RecipeChanges,
) -> Result<RecipeDetail, CatalogError> {
    conn.transaction(|conn| {
        let existing = find_by_id(conn, id)?;

        let mut errors = ValidationErrors::default();
        let name = changes
            .name
            .as_deref()
            .map(|name| required_name(name, &mut errors));
        let ingredients = match &changes.ingredient_ids {
            Some(ids) => Some(resolve_ingredients(conn, ids, &mut errors)?),
            None => None,
        };
        errors.into_result()?;

        let target = recipes::table.find(existing.recipe.id);
        let recipe: Recipe = match name {
            Some(name) => diesel::update(target)
                .set((recipes::name.eq(name), recipes::updated_at.eq(diesel::dsl::now)))
                .returning(Recipe::as_returning())
                .get_result(conn)?,
            None => diesel::update(target)
                .set(recipes::updated_at.eq(diesel::dsl::now))
                .returning(Recipe::as_returning())
                .get_result(conn)?,
        };

        let ingredients = match ingredients {
            Some(ingredients) => {
                diesel::delete(
                    ingredients_recipes::table.filter(ingredients_recipes::recipe_id.eq(recipe.id)),
                )
                .execute(conn)?;
                attach_ingredients(conn, &recipe, &ingredients)?;
                ingredients
            }
            None => existing.ingredients,
        };

        Ok(RecipeDetail {
            recipe,
            ingredients,
        })
    })
}

/// Deletes a recipe. Its join rows go with it via the foreign key cascade.
pub fn destroy(conn: &mut SqliteConnection, id: i32) -> Result<(), CatalogError> {
    match diesel::delete(recipes::table.find(id)).execute(conn)? {
        0 => Err(CatalogError::NotFound("Recipe")),
        _ => Ok(()),
    }
}

/// Deletes every recipe and every ingredient, and with them the whole join
/// table.
pub fn destroy_all(conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    conn.transaction(|conn| {
        diesel::delete(recipes::table).execute(conn)?;
        diesel::delete(ingredients::table).execute(conn)?;
        Ok(())
    })
}

/// Ids bound per lookup query, well under SQLite's bound-parameter limit.
const ID_LOOKUP_CHUNK: usize = 500;

/// Loads the ingredients for a set of ids, recording every id that does not
/// exist. Duplicate ids collapse; the result is ordered by id.
fn resolve_ingredients(
    conn: &mut SqliteConnection,
    ids: &[i32],
    errors: &mut ValidationErrors,
) -> Result<Vec<Ingredient>, CatalogError> {
    let wanted: BTreeSet<i32> = ids.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let wanted: Vec<i32> = wanted.into_iter().collect();
    let mut found: Vec<Ingredient> = Vec::new();
    for chunk in wanted.chunks(ID_LOOKUP_CHUNK) {
        found.extend(
            ingredients::table
                .filter(ingredients::id.eq_any(chunk.to_vec()))
                .order(ingredients::id.asc())
                .select(Ingredient::as_select())
                .load(conn)?,
        );
    }

    let known: BTreeSet<i32> = found.iter().map(|i| i.id).collect();
    for id in wanted.iter().filter(|id| !known.contains(id)) {
        errors.add("ingredient_ids", format!("unknown ingredient id {id}"));
    }

    Ok(found)
}
