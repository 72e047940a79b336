//! Route definitions for users and groups.

use axum::routing::get;
use axum::Router;

use crate::handlers::{groups, users};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).patch(users::update_user),
        )
        .route("/groups", get(groups::list_groups))
}
