use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::guest_repo;
use crate::models::GuestRow;
use crate::services::guest_service::{self, GuestUpdateError, SYSTEM_ACTOR};

type ApiError = (StatusCode, Json<Value>);

fn database_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "DATABASE_ERROR" })),
    )
}

pub async fn list_guests_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GuestRow>>, ApiError> {
    guest_repo::list_all(&pool).await.map(Json).map_err(|e| {
        warn!(error = %e, "guest list query failed");
        database_error()
    })
}

pub async fn list_family_handler(
    Path(family_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GuestRow>>, ApiError> {
    guest_repo::list_by_family(&pool, &family_id)
        .await
        .map(Json)
        .map_err(|e| {
            warn!(family_id = %family_id, error = %e, "family guest query failed");
            database_error()
        })
}

pub async fn list_unassigned_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<GuestRow>>, ApiError> {
    guest_repo::list_unassigned(&pool)
        .await
        .map(Json)
        .map_err(|e| {
            warn!(error = %e, "unassigned guest query failed");
            database_error()
        })
}

/// Actor label for the audit trail. There is no session layer here; the
/// admin UI passes its user through a header, anything else counts as the
/// system actor.
fn actor_from_headers(headers: &HeaderMap) -> &str {
    headers
        .get("x-admin-user")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(SYSTEM_ACTOR)
}

pub async fn update_guest_handler(
    Path(guest_id): Path<i64>,
    State(pool): State<SqlitePool>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let Some(fields) = body.as_object() else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "INVALID_BODY",
                "detail": "expected a JSON object of field values"
            })),
        ));
    };

    let actor = actor_from_headers(&headers);
    match guest_service::update_guest_fields(&pool, guest_id, fields, actor).await {
        Ok(update) => Ok(Json(json!({
            "success": true,
            "updated_fields": update.updated_fields,
            "guest": update.guest
        }))),
        Err(GuestUpdateError::Validation(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.code(), "detail": e.to_string() })),
        )),
        Err(GuestUpdateError::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "GUEST_NOT_FOUND" })),
        )),
        Err(GuestUpdateError::Storage(e)) => {
            warn!(guest_id, error = %e, "guest update failed");
            Err(database_error())
        }
    }
}

pub async fn stats_handler(State(pool): State<SqlitePool>) -> Result<Json<Value>, ApiError> {
    let stats = guest_repo::load_stats(&pool).await.map_err(|e| {
        warn!(error = %e, "stats query failed");
        database_error()
    })?;

    let responded = stats.total - stats.pending;
    let response_rate = if stats.total > 0 {
        (responded as f64 / stats.total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    Ok(Json(json!({
        "total_guests": stats.total,
        "attending": stats.attending,
        "not_attending": stats.not_attending,
        "pending": stats.pending,
        "response_rate": response_rate
    })))
}
