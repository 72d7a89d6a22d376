mod dto;
pub mod handlers;
mod repo;

use crate::state::AppState;
use axum::Router;

pub use dto::{SaveSearchRequest, SavedSearchResponse, SearchHistoryItem};

pub fn router() -> Router<AppState> {
    handlers::history_routes()
}
