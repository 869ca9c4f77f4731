use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::services::ai_service::{self, AiTopic};
use crate::web::AppState;

async fn suggestions(state: &AppState, topic: AiTopic) -> Json<Value> {
    let cache_key = format!("ai_{}", topic.as_str());
    if let Some(hit) = state.upstream_cache.get(&cache_key).await {
        return Json(hit);
    }

    match ai_service::fetch_suggestions(topic).await {
        Ok(payload) => {
            state.upstream_cache.put(&cache_key, payload.clone()).await;
            Json(payload)
        }
        Err(e) => {
            warn!(topic = topic.as_str(), error = %e, "ai suggestions unavailable, serving fallback");
            Json(ai_service::fallback_suggestions(topic))
        }
    }
}

pub async fn hen_handler(State(state): State<AppState>) -> Json<Value> {
    suggestions(&state, AiTopic::Hen).await
}

pub async fn stag_handler(State(state): State<AppState>) -> Json<Value> {
    suggestions(&state, AiTopic::Stag).await
}
