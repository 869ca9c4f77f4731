use sqlx::SqlitePool;

use crate::database::guest_changes_repo;
use crate::models::GuestChangeWithGuestRow;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 500;

/// Most recent changes first, optionally filtered to one guest. Each entry
/// carries the guest's current name via a read-time join.
pub async fn load_recent_changes(
    pool: &SqlitePool,
    guest_id: Option<i64>,
    limit: Option<i64>,
) -> sqlx::Result<Vec<GuestChangeWithGuestRow>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    guest_changes_repo::list_recent(pool, guest_id, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::guest_changes_repo::NewGuestChange;
    use crate::database::{guest_repo, schema};
    use crate::services::guest_service::{self, SYSTEM_ACTOR};
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        schema::init(&pool).await.expect("schema init");
        pool
    }

    async fn seed_guest(pool: &SqlitePool, name: &str) -> i64 {
        guest_repo::insert_guest(
            pool,
            guest_repo::NewGuest {
                name,
                family_id: None,
                email: None,
                mobile: None,
                address: None,
                attending: "maybe",
            },
        )
        .await
        .expect("seed guest")
    }

    async fn seed_change(pool: &SqlitePool, guest_id: i64, field: &str, changed_at: &str) {
        let mut conn = pool.acquire().await.expect("conn");
        guest_changes_repo::insert_change(
            &mut conn,
            NewGuestChange {
                guest_id,
                field_name: field,
                old_value: None,
                new_value: Some("x"),
                changed_at,
                changed_by: SYSTEM_ACTOR,
            },
        )
        .await
        .expect("seed change");
    }

    #[tokio::test]
    async fn history_returns_newest_first_and_honors_limit() {
        let pool = test_pool().await;
        let id = seed_guest(&pool, "John Smith").await;

        seed_change(&pool, id, "email", "2026-01-01T10:00:00.000").await;
        seed_change(&pool, id, "mobile", "2026-01-02T10:00:00.000").await;
        seed_change(&pool, id, "comment", "2026-01-03T10:00:00.000").await;

        let history = load_recent_changes(&pool, Some(id), Some(2))
            .await
            .expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].field_name, "comment");
        assert_eq!(history[1].field_name, "mobile");
    }

    #[tokio::test]
    async fn history_filters_by_guest() {
        let pool = test_pool().await;
        let a = seed_guest(&pool, "Anna").await;
        let b = seed_guest(&pool, "Ben").await;

        seed_change(&pool, a, "email", "2026-01-01T10:00:00.000").await;
        seed_change(&pool, b, "email", "2026-01-02T10:00:00.000").await;

        let all = load_recent_changes(&pool, None, None).await.expect("history");
        assert_eq!(all.len(), 2);

        let only_a = load_recent_changes(&pool, Some(a), None)
            .await
            .expect("history");
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].guest_id, a);
    }

    #[tokio::test]
    async fn history_shows_guest_current_name_after_rename() {
        let pool = test_pool().await;
        let id = seed_guest(&pool, "John Smith").await;

        guest_service::update_guest_fields(
            &pool,
            id,
            json!({"attending": "yes"}).as_object().unwrap(),
            SYSTEM_ACTOR,
        )
        .await
        .expect("update");
        guest_service::update_guest_fields(
            &pool,
            id,
            json!({"name": "John Smythe"}).as_object().unwrap(),
            SYSTEM_ACTOR,
        )
        .await
        .expect("rename");

        let history = load_recent_changes(&pool, Some(id), None)
            .await
            .expect("history");
        assert_eq!(history.len(), 2);
        for entry in &history {
            assert_eq!(entry.guest_name.as_deref(), Some("John Smythe"));
        }
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let pool = test_pool().await;
        let id = seed_guest(&pool, "Anna").await;
        seed_change(&pool, id, "email", "2026-01-01T10:00:00.000").await;

        // A zero or negative limit still returns at least one row.
        let history = load_recent_changes(&pool, None, Some(0)).await.expect("history");
        assert_eq!(history.len(), 1);
    }
}
