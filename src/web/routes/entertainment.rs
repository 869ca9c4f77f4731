use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::services::entertainment_service;
use crate::web::AppState;

/// Upcoming events, cached for the configured TTL. An upstream outage
/// degrades to the static fallback list instead of erroring the page.
pub async fn events_handler(State(state): State<AppState>) -> Json<Value> {
    if let Some(hit) = state.upstream_cache.get("entertainment_events").await {
        return Json(hit);
    }

    match entertainment_service::fetch_events().await {
        Ok(events) => {
            state
                .upstream_cache
                .put("entertainment_events", events.clone())
                .await;
            Json(events)
        }
        Err(e) => {
            warn!(error = %e, "entertainment events unavailable, serving fallback");
            Json(entertainment_service::fallback_events())
        }
    }
}

pub async fn posts_handler(State(state): State<AppState>) -> Json<Value> {
    if let Some(hit) = state.upstream_cache.get("entertainment_posts").await {
        return Json(hit);
    }

    match entertainment_service::fetch_posts().await {
        Ok(posts) => {
            state
                .upstream_cache
                .put("entertainment_posts", posts.clone())
                .await;
            Json(posts)
        }
        Err(e) => {
            warn!(error = %e, "entertainment posts unavailable, serving fallback");
            Json(entertainment_service::fallback_posts())
        }
    }
}
