use super::{required_name, CatalogError, ValidationErrors};
use crate::models::{Ingredient, NewIngredient, Recipe, RecipeIngredient};
use crate::schema::{ingredients, recipes};
use diesel::prelude::*;

/// An ingredient together with every recipe that uses it.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDetail {
    pub ingredient: Ingredient,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Default)]
pub struct IngredientParams {
    pub name: String,
}

pub fn find_all(conn: &mut SqliteConnection) -> Result<Vec<Ingredient>, CatalogError> {
    Ok(ingredients::table
        .order(ingredients::id.asc())
        .select(Ingredient::as_select())
        .load(conn)?)
}

pub fn find_by_id(conn: &mut SqliteConnection, id: i32) -> Result<IngredientDetail, CatalogError> {
    let ingredient: Ingredient = ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()?
        .ok_or(CatalogError::NotFound("Ingredient"))?;

    let recipes: Vec<Recipe> = RecipeIngredient::belonging_to(&ingredient)
        .inner_join(recipes::table)
        .order(recipes::id.asc())
        .select(Recipe::as_select())
        .load(conn)?;

    Ok(IngredientDetail {
        ingredient,
        recipes,
    })
}

pub fn create(
    conn: &mut SqliteConnection,
    params: &IngredientParams,
) -> Result<Ingredient, CatalogError> {
    let mut errors = ValidationErrors::default();
    let name = required_name(&params.name, &mut errors);
    errors.into_result()?;

    Ok(diesel::insert_into(ingredients::table)
        .values(&NewIngredient { name })
        .returning(Ingredient::as_returning())
        .get_result(conn)?)
}

pub fn update(
    conn: &mut SqliteConnection,
    id: i32,
    params: &IngredientParams,
) -> Result<Ingredient, CatalogError> {
    let mut errors = ValidationErrors::default();
    let name = required_name(&params.name, &mut errors);
    errors.into_result()?;

    diesel::update(ingredients::table.find(id))
        .set((
            ingredients::name.eq(name),
            ingredients::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Ingredient::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or(CatalogError::NotFound("Ingredient"))
}

/// Deletes an ingredient and unlinks it from every recipe.
pub fn destroy(conn: &mut SqliteConnection, id: i32) -> Result<(), CatalogError> {
    match diesel::delete(ingredients::table.find(id)).execute(conn)? {
        0 => Err(CatalogError::NotFound("Ingredient")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::recipes::{self, RecipeParams};
    use crate::catalog::BLANK;
    use crate::test_support::TestDb;

    fn params(name: &str) -> IngredientParams {
        IngredientParams {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_create_and_list() {
        let db = TestDb::new();
        let mut conn = db.conn();

        let flour = create(&mut conn, &params(" flour ")).unwrap();
        create(&mut conn, &params("water")).unwrap();

        assert_eq!(flour.name, "flour");
        let names: Vec<String> = find_all(&mut conn)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["flour", "water"]);
    }

    #[test]
    fn test_create_blank_name() {
        let db = TestDb::new();
        let mut conn = db.conn();

        match create(&mut conn, &params("")) {
            Err(CatalogError::Invalid(errors)) => assert_eq!(errors.field("name"), [BLANK]),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(find_all(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_id_lists_recipes() {
        let db = TestDb::new();
        let mut conn = db.conn();
        let oil = create(&mut conn, &params("oil")).unwrap();
        for name in ["Dressing", "Stir fry"] {
            recipes::create(
                &mut conn,
                &RecipeParams {
                    name: name.to_string(),
                    ingredient_ids: vec![oil.id],
                },
                None,
            )
            .unwrap();
        }

        let detail = find_by_id(&mut conn, oil.id).unwrap();
        let recipe_names: Vec<&str> = detail.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(recipe_names, ["Dressing", "Stir fry"]);
        assert!(matches!(
            find_by_id(&mut conn, oil.id + 100),
            Err(CatalogError::NotFound("Ingredient"))
        ));
    }

    #[test]
    fn test_update_renames() {
        let db = TestDb::new();
        let mut conn = db.conn();
        let leek = create(&mut conn, &params("leak")).unwrap();

        let fixed = update(&mut conn, leek.id, &params("leek")).unwrap();

        assert_eq!(fixed.id, leek.id);
        assert_eq!(fixed.name, "leek");
        assert!(matches!(
            update(&mut conn, leek.id + 1, &params("x")),
            Err(CatalogError::NotFound("Ingredient"))
        ));
    }

    #[test]
    fn test_destroy_unlinks_from_recipes() {
        let db = TestDb::new();
        let mut conn = db.conn();
        let sugar = create(&mut conn, &params("sugar")).unwrap();
        let cake = recipes::create(
            &mut conn,
            &RecipeParams {
                name: "Cake".to_string(),
                ingredient_ids: vec![sugar.id],
            },
            None,
        )
        .unwrap();

        destroy(&mut conn, sugar.id).unwrap();

        let cake = recipes::find_by_id(&mut conn, cake.recipe.id).unwrap();
        assert!(cake.ingredients.is_empty());
        assert!(matches!(
            destroy(&mut conn, sugar.id),
            Err(CatalogError::NotFound("Ingredient"))
        ));
    }
}
