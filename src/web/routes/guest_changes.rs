use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::models::GuestChangeWithGuestRow;
use crate::services::change_log_service;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    limit: Option<i64>,
    guest_id: Option<i64>,
}

pub async fn history_handler(
    Query(query): Query<HistoryQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GuestChangeWithGuestRow>>, (StatusCode, Json<Value>)> {
    change_log_service::load_recent_changes(&pool, query.guest_id, query.limit)
        .await
        .map(Json)
        .map_err(|e| {
            warn!(error = %e, "guest change history query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "DATABASE_ERROR" })),
            )
        })
}
