use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument};

use super::{
    dto::{SaveSearchRequest, SavedSearchResponse, SearchHistoryItem},
    repo,
};
use crate::{
    auth::AuthUser,
    error::{json_body, ApiError, ApiResult},
    state::AppState,
};

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/search-history", post(save_search).get(list_searches))
}

#[instrument(skip(state, user, payload), fields(user_id = user.user_id))]
pub async fn save_search(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<SaveSearchRequest>, JsonRejection>,
) -> ApiResult<Json<SavedSearchResponse>> {
    let payload = json_body(payload)?;
    let history_id = repo::insert(&state.db, user.user_id, &payload.tool_name)
        .await
        .map_err(|e| {
            error!(error = %e, "insert search history failed");
            ApiError::Internal("Failed to save search history")
        })?;

    info!(history_id, tool_name = %payload.tool_name, "search saved");
    Ok(Json(SavedSearchResponse { history_id }))
}

#[instrument(skip(state, user), fields(user_id = user.user_id))]
pub async fn list_searches(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<SearchHistoryItem>>> {
    let items = repo::list_by_user(&state.db, user.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "list search history failed");
            ApiError::Internal("Failed to retrieve search history")
        })?;
    Ok(Json(items))
}
