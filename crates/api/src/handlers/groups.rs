//! Handler for the `/groups` resource.

use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /groups
///
/// Sorted distinct non-null group names, for populating selection choices.
pub async fn list_groups(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.store.distinct_groups().await?))
}
