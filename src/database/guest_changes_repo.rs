use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{GuestChangeRow, GuestChangeWithGuestRow};

pub struct NewGuestChange<'a> {
    pub guest_id: i64,
    pub field_name: &'a str,
    pub old_value: Option<&'a str>,
    pub new_value: Option<&'a str>,
    pub changed_at: &'a str,
    pub changed_by: &'a str,
}

const SQL_INSERT_CHANGE: &str = r#"
INSERT INTO guest_changes (
  guest_id,
  field_name,
  old_value,
  new_value,
  changed_at,
  changed_by
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

/// Append one audit row on the caller's connection. The update path calls
/// this inside its open transaction so the audit rows commit (or roll back)
/// together with the guest row.
pub async fn insert_change(
    conn: &mut SqliteConnection,
    change: NewGuestChange<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_CHANGE)
        .bind(change.guest_id)
        .bind(change.field_name)
        .bind(change.old_value)
        .bind(change.new_value)
        .bind(change.changed_at)
        .bind(change.changed_by)
        .execute(conn)
        .await?;
    Ok(())
}

pub const SQL_LIST_RECENT: &str = r#"
SELECT
  c.id,
  c.guest_id,
  g.name AS guest_name,
  c.field_name,
  c.old_value,
  c.new_value,
  c.changed_at,
  c.changed_by
FROM guest_changes c
LEFT JOIN guests g ON g.id = c.guest_id
WHERE (?1 IS NULL OR c.guest_id = ?1)
ORDER BY c.changed_at DESC, c.id DESC
LIMIT ?2
"#;

pub async fn list_recent(
    pool: &SqlitePool,
    guest_id: Option<i64>,
    limit: i64,
) -> sqlx::Result<Vec<GuestChangeWithGuestRow>> {
    sqlx::query_as::<_, GuestChangeWithGuestRow>(SQL_LIST_RECENT)
        .bind(guest_id)
        .bind(limit)
        .fetch_all(pool)
        .await
}

pub const SQL_LIST_FOR_GUEST: &str = r#"
SELECT
  id,
  guest_id,
  field_name,
  old_value,
  new_value,
  changed_at,
  changed_by
FROM guest_changes
WHERE guest_id = ?1
ORDER BY changed_at ASC, id ASC
"#;

pub async fn list_for_guest(
    pool: &SqlitePool,
    guest_id: i64,
) -> sqlx::Result<Vec<GuestChangeRow>> {
    sqlx::query_as::<_, GuestChangeRow>(SQL_LIST_FOR_GUEST)
        .bind(guest_id)
        .fetch_all(pool)
        .await
}
