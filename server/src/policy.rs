//! Access policy for resource actions.
//!
//! Recipes and ingredients share one table: reads are public, anything that
//! renders a form or writes needs a session. Routers attach handlers through
//! [`guard`], so a route cannot be registered without passing through
//! [`Action::access`].

use crate::auth::require_auth;
use crate::AppState;
use axum::middleware;
use axum::routing::MethodRouter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Index,
    Show,
    New,
    Create,
    Edit,
    Update,
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

impl Action {
    pub const fn access(self) -> Access {
        match self {
            Action::Index | Action::Show => Access::Public,
            Action::New | Action::Create | Action::Edit | Action::Update | Action::Destroy => {
                Access::Authenticated
            }
        }
    }
}

/// Wraps `route` in the authentication layer when `action` requires it.
pub fn guard(
    state: &AppState,
    action: Action,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    match action.access() {
        Access::Public => route,
        Access::Authenticated => {
            route.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        }
    }
}
