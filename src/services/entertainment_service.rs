use std::fmt;

use serde_json::{json, Value};
use tracing::warn;

/// Upstream call failed; callers degrade to a fallback payload instead of
/// surfacing a 500.
#[derive(Debug)]
pub struct UpstreamError(pub String);

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream request failed: {}", self.0)
    }
}

fn entertainment_base_url() -> String {
    std::env::var("ENTERTAINMENT_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8600".to_string())
}

async fn fetch_json(url: &str) -> Result<Value, UpstreamError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| UpstreamError(e.to_string()))?;

    if !resp.status().is_success() {
        warn!(url = %url, status = %resp.status(), "entertainment upstream non-OK");
        return Err(UpstreamError(format!("status {}", resp.status())));
    }

    resp.json().await.map_err(|e| UpstreamError(e.to_string()))
}

/// Upcoming band events from the entertainment service.
pub async fn fetch_events() -> Result<Value, UpstreamError> {
    let url = format!("{}/events", entertainment_base_url().trim_end_matches('/'));
    fetch_json(&url).await
}

/// Promotional posts from the entertainment service.
pub async fn fetch_posts() -> Result<Value, UpstreamError> {
    let url = format!("{}/posts", entertainment_base_url().trim_end_matches('/'));
    fetch_json(&url).await
}

/// Static event list shown when the upstream is unreachable.
pub fn fallback_events() -> Value {
    json!([
        {
            "title": "BEARD @ The Vaults",
            "url": "https://www.facebook.com/bearduk/events",
            "date": "Fri, 28 Nov at 21:00",
            "venue": "The Vaults, Southsea"
        },
        {
            "title": "BEARD @ Steamtown",
            "url": "https://www.facebook.com/bearduk/events",
            "date": "Fri, 19 Dec at 20:00",
            "venue": "Steam Town Brew Co, Eastleigh"
        },
        {
            "title": "BEARD @ The Anglers",
            "url": "https://www.facebook.com/bearduk/events",
            "date": "Sun, 21 Dec at 16:00",
            "venue": "The Anglers"
        }
    ])
}

pub fn fallback_posts() -> Value {
    let image = "/assets/images/entertainment.svg";
    json!([
        {
            "caption": "Beard live highlight reel – book us for your next party!",
            "permalink": "https://www.instagram.com/beardbanduk/",
            "image_url": image,
            "timestamp": null
        },
        {
            "caption": "Follow @beardbanduk for the latest gig updates!",
            "permalink": "https://www.instagram.com/beardbanduk/",
            "image_url": image,
            "timestamp": null
        },
        {
            "caption": "Indie anthems and party classics - bringing the energy to every venue!",
            "permalink": "https://www.instagram.com/beardbanduk/",
            "image_url": image,
            "timestamp": null
        }
    ])
}
