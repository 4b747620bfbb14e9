pub mod create;
pub mod delete;
pub mod edit;
pub mod form;
pub mod get;
pub mod list;
pub mod new;
pub mod update;

use crate::policy::{guard, Action};
use crate::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for recipe endpoints, including the site root.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", guard(state, Action::Index, get(list::root)))
        .route(
            "/recipes",
            guard(state, Action::Index, get(list::list_recipes))
                .merge(guard(state, Action::Create, post(create::create_recipe))),
        )
        .route(
            "/recipes/new",
            guard(state, Action::New, get(new::new_recipe)),
        )
        .route(
            "/recipes/{id}",
            guard(state, Action::Show, get(get::get_recipe))
                .merge(guard(
                    state,
                    Action::Update,
                    put(update::update_recipe).patch(update::update_recipe),
                ))
                .merge(guard(state, Action::Destroy, delete(delete::delete_recipe))),
        )
        .route(
            "/recipes/{id}/edit",
            guard(state, Action::Edit, get(edit::edit_recipe)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::root,
        list::list_recipes,
        get::get_recipe,
        new::new_recipe,
        create::create_recipe,
        edit::edit_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        get::RecipeResponse,
        get::IngredientSummary,
        form::RecipeForm,
        form::RecipeFormResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use crate::catalog::ingredients::{self, IngredientParams};
    use crate::catalog::recipes::{self, RecipeParams};
    use crate::catalog::BLANK;
    use crate::test_support::{send, TestDb};
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    fn ingredient(db: &TestDb, name: &str) -> i32 {
        ingredients::create(
            &mut db.conn(),
            &IngredientParams {
                name: name.to_string(),
            },
        )
        .unwrap()
        .id
    }

    fn recipe(db: &TestDb, name: &str, ingredient_ids: Vec<i32>) -> i32 {
        recipes::create(
            &mut db.conn(),
            &RecipeParams {
                name: name.to_string(),
                ingredient_ids,
            },
            None,
        )
        .unwrap()
        .recipe
        .id
    }

    #[tokio::test]
    async fn test_list_and_show_are_public() {
        let db = TestDb::new();
        let basil = ingredient(&db, "basil");
        let id = recipe(&db, "Pesto", vec![basil]);

        for uri in ["/", "/recipes"] {
            let res = send(db.app(), Method::GET, uri, None, None).await;
            assert_eq!(res.status, StatusCode::OK, "{uri}");
            assert_eq!(res.body["recipes"][0]["name"], "Pesto");
            assert_eq!(res.body["recipes"][0]["ingredients"][0]["name"], "basil");
        }

        let res = send(db.app(), Method::GET, &format!("/recipes/{id}"), None, None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["ingredients"], json!([{"id": basil, "name": "basil"}]));
    }

    #[tokio::test]
    async fn test_show_missing_recipe_is_404() {
        let db = TestDb::new();
        let res = send(db.app(), Method::GET, "/recipes/999", None, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn test_writes_require_a_session() {
        let db = TestDb::new();
        let id = recipe(&db, "Toast", vec![]);
        let body = Some(json!({"name": "Burnt toast"}));

        let attempts = [
            (Method::GET, "/recipes/new".to_string(), None),
            (Method::POST, "/recipes".to_string(), body.clone()),
            (Method::GET, format!("/recipes/{id}/edit"), None),
            (Method::PUT, format!("/recipes/{id}"), body.clone()),
            (Method::PATCH, format!("/recipes/{id}"), body.clone()),
            (Method::DELETE, format!("/recipes/{id}"), None),
        ];
        for (method, uri, body) in attempts {
            let res = send(db.app(), method.clone(), &uri, None, body).await;
            assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert!(res.headers.contains_key(header::WWW_AUTHENTICATE));
        }

        let res = send(db.app(), Method::GET, "/recipes/new", Some("bogus"), None).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);

        // Nothing changed.
        let detail = recipes::find_by_id(&mut db.conn(), id).unwrap();
        assert_eq!(detail.recipe.name, "Toast");
    }

    #[tokio::test]
    async fn test_new_form_lists_available_ingredients() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        ingredient(&db, "salt");
        ingredient(&db, "pepper");

        let res = send(db.app(), Method::GET, "/recipes/new", Some(&token), None).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["recipe"], json!({"name": "", "ingredient_ids": []}));
        assert_eq!(res.body["ingredients"][1]["name"], "pepper");
        assert_eq!(res.body["errors"], json!({}));
    }

    #[tokio::test]
    async fn test_create_links_ingredients_and_owner() {
        let db = TestDb::new();
        let (user, token) = db.user_with_session("chef");
        let flour = ingredient(&db, "flour");
        let water = ingredient(&db, "water");

        let res = send(
            db.app(),
            Method::POST,
            "/recipes",
            Some(&token),
            Some(json!({
                "name": "Bread",
                "ingredient_ids": [water, flour, water],
                "rating": 5
            })),
        )
        .await;

        assert_eq!(res.status, StatusCode::CREATED);
        let id = res.body["id"].as_i64().unwrap();
        assert_eq!(res.headers[header::LOCATION], format!("/recipes/{id}"));
        assert_eq!(res.body["user_id"], user.id);
        assert_eq!(res.body["ingredients"].as_array().unwrap().len(), 2);

        let detail = recipes::find_by_id(&mut db.conn(), id as i32).unwrap();
        assert_eq!(detail.ingredient_ids(), [flour, water]);
    }

    #[tokio::test]
    async fn test_create_blank_name_rerenders_form() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        let egg = ingredient(&db, "egg");

        let res = send(
            db.app(),
            Method::POST,
            "/recipes",
            Some(&token),
            Some(json!({"name": "  ", "ingredient_ids": [egg, egg + 50]})),
        )
        .await;

        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["errors"]["name"], json!([BLANK]));
        assert!(res.body["errors"]["ingredient_ids"].is_array());
        assert_eq!(res.body["recipe"]["ingredient_ids"], json!([egg, egg + 50]));
        assert_eq!(res.body["ingredients"][0]["name"], "egg");
        assert!(recipes::find_all(&mut db.conn()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_mistyped_fields_rerender_form() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        ingredient(&db, "egg");

        let cases = [
            (json!({"name": 5}), "name"),
            (json!({"name": null}), "name"),
            (json!({"name": "Omelette", "ingredient_ids": ["a"]}), "ingredient_ids"),
            (json!({"name": "Omelette", "ingredient_ids": null}), "ingredient_ids"),
        ];
        for (body, field) in cases {
            let res = send(db.app(), Method::POST, "/recipes", Some(&token), Some(body.clone())).await;
            assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
            assert_eq!(res.body["errors"][field].as_array().unwrap().len(), 1, "{body}");
            assert_eq!(res.body["ingredients"][0]["name"], "egg", "{body}");
        }

        assert!(recipes::find_all(&mut db.conn()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_json_body() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");

        let res = send(db.app(), Method::POST, "/recipes", Some(&token), None).await;
        assert_eq!(res.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(res.body["error"].is_string());

        let res = send(db.app(), Method::POST, "/recipes", Some(&token), Some(json!([1]))).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["error"], "Request body must be a JSON object");
    }

    #[tokio::test]
    async fn test_update_mistyped_name_keeps_recipe() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        let id = recipe(&db, "Chili", vec![]);

        let res = send(
            db.app(),
            Method::PATCH,
            &format!("/recipes/{id}"),
            Some(&token),
            Some(json!({"name": 5})),
        )
        .await;

        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["recipe"]["name"], "Chili");
        assert_eq!(res.body["errors"]["name"].as_array().unwrap().len(), 1);
        assert_eq!(recipes::find_by_id(&mut db.conn(), id).unwrap().recipe.name, "Chili");
    }

    #[tokio::test]
    async fn test_edit_prefills_form() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        let rice = ingredient(&db, "rice");
        let id = recipe(&db, "Risotto", vec![rice]);

        let res = send(
            db.app(),
            Method::GET,
            &format!("/recipes/{id}/edit"),
            Some(&token),
            None,
        )
        .await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["id"], id);
        assert_eq!(
            res.body["recipe"],
            json!({"name": "Risotto", "ingredient_ids": [rice]})
        );

        let res = send(db.app(), Method::GET, "/recipes/77/edit", Some(&token), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_replaces_ingredients() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        let bun = ingredient(&db, "bun");
        let patty = ingredient(&db, "patty");
        let id = recipe(&db, "Burger", vec![bun]);

        let res = send(
            db.app(),
            Method::PATCH,
            &format!("/recipes/{id}"),
            Some(&token),
            Some(json!({"ingredient_ids": [patty]})),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["name"], "Burger");
        assert_eq!(res.body["ingredients"], json!([{"id": patty, "name": "patty"}]));

        let res = send(
            db.app(),
            Method::PUT,
            &format!("/recipes/{id}"),
            Some(&token),
            Some(json!({"name": ""})),
        )
        .await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["errors"]["name"], json!([BLANK]));
        assert_eq!(res.body["recipe"]["ingredient_ids"], json!([patty]));

        let detail = recipes::find_by_id(&mut db.conn(), id).unwrap();
        assert_eq!(detail.recipe.name, "Burger");
    }

    #[tokio::test]
    async fn test_delete_recipe() {
        let db = TestDb::new();
        let (_, token) = db.user_with_session("chef");
        let id = recipe(&db, "Soup", vec![]);

        let res = send(
            db.app(),
            Method::DELETE,
            &format!("/recipes/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);

        let res = send(
            db.app(),
            Method::DELETE,
            &format!("/recipes/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
