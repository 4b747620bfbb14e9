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

/// Returns the router for ingredient endpoints.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/ingredients",
            guard(state, Action::Index, get(list::list_ingredients))
                .merge(guard(state, Action::Create, post(create::create_ingredient))),
        )
        .route(
            "/ingredients/new",
            guard(state, Action::New, get(new::new_ingredient)),
        )
        .route(
            "/ingredients/{id}",
            guard(state, Action::Show, get(get::get_ingredient))
                .merge(guard(
                    state,
                    Action::Update,
                    put(update::update_ingredient).patch(update::update_ingredient),
                ))
                .merge(guard(
                    state,
                    Action::Destroy,
                    delete(delete::delete_ingredient),
                )),
        )
        .route(
            "/ingredients/{id}/edit",
            guard(state, Action::Edit, get(edit::edit_ingredient)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_ingredients,
        get::get_ingredient,
        new::new_ingredient,
        create::create_ingredient,
        edit::edit_ingredient,
        update::update_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(
        list::ListIngredientsResponse,
        get::IngredientResponse,
        get::IngredientDetailResponse,
        get::RecipeSummary,
        form::IngredientForm,
        form::IngredientFormResponse,
        create::CreateIngredientRequest,
        update::UpdateIngredientRequest,
    ))
)]
pub struct ApiDoc;
