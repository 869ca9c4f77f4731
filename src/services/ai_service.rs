use serde_json::{json, Value};
use tracing::warn;

use crate::services::entertainment_service::UpstreamError;

/// Party-planning topics the AI suggestion service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTopic {
    Hen,
    Stag,
}

impl AiTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hen => "hen",
            Self::Stag => "stag",
        }
    }
}

fn ai_base_url() -> String {
    std::env::var("AI_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8700".to_string())
}

pub async fn fetch_suggestions(topic: AiTopic) -> Result<Value, UpstreamError> {
    let url = format!(
        "{}/suggestions/{}",
        ai_base_url().trim_end_matches('/'),
        topic.as_str()
    );

    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| UpstreamError(e.to_string()))?;

    if !resp.status().is_success() {
        warn!(url = %url, status = %resp.status(), "ai upstream non-OK");
        return Err(UpstreamError(format!("status {}", resp.status())));
    }

    resp.json().await.map_err(|e| UpstreamError(e.to_string()))
}

/// Empty-but-valid payload so the page still renders during an outage.
pub fn fallback_suggestions(topic: AiTopic) -> Value {
    json!({
        "topic": topic.as_str(),
        "suggestions": [],
        "note": "Suggestions are temporarily unavailable."
    })
}
