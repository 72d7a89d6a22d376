use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

time::serde::format_description!(
    sqlite_datetime,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

#[derive(Debug, Deserialize)]
pub struct SaveSearchRequest {
    pub tool_name: String,
}

#[derive(Debug, Serialize)]
pub struct SavedSearchResponse {
    pub history_id: i64,
}

/// One row of a user's history, newest first when listed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SearchHistoryItem {
    pub tool_name: String,
    #[serde(with = "sqlite_datetime")]
    pub search_time: PrimitiveDateTime, // UTC, as written by the store
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn search_time_serializes_like_the_store() {
        let item = SearchHistoryItem {
            tool_name: "scanner".into(),
            search_time: datetime!(2024-03-05 08:09:10),
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({ "tool_name": "scanner", "search_time": "2024-03-05 08:09:10" })
        );
    }
}
