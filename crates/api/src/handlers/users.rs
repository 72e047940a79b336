//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staffdir_core::listing::{self, ListingQuery, UserPage};
use staffdir_core::types::DbId;
use staffdir_core::user::{CreateUser, UpdateUser, User};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /users`.
///
/// Everything is optional and arrives as raw text; malformed values are
/// degraded to defaults by [`ListingQuery::from_params`] rather than
/// rejected, so the listing endpoint answers 200 for any input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

/// GET /users
///
/// The paginated, searchable, sortable listing. Runs the pure listing
/// engine over the store's full scan.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> AppResult<Json<UserPage>> {
    let query = ListingQuery::from_params(
        params.page.as_deref().and_then(|p| p.parse().ok()),
        params.page_size.as_deref().and_then(|p| p.parse().ok()),
        params.search.as_deref(),
        params.sort_by.as_deref(),
        params.sort_dir.as_deref(),
    );
    let records = state.store.list().await?;
    Ok(Json(listing::run(&records, &query)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.store.get(id).await?))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let new_user = input.validate()?;
    let user = state.store.create(&new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let patch = input.validate()?;
    Ok(Json(state.store.update(id, &patch).await?))
}
