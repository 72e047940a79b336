pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree.
///
/// ```text
/// GET    /users        paginated, searchable, sortable listing
/// POST   /users        create
/// GET    /users/{id}   fetch one
/// PATCH  /users/{id}   partial update
/// GET    /groups       distinct group names
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(users::router())
}
