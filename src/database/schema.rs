use sqlx::SqlitePool;

pub const SQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS guests (
  id             INTEGER PRIMARY KEY AUTOINCREMENT,
  name           TEXT NOT NULL CHECK (length(trim(name)) > 0),
  family_id      TEXT,
  email          TEXT,
  mobile         TEXT,
  address        TEXT,
  attending      TEXT NOT NULL DEFAULT 'maybe'
                 CHECK (attending IN ('yes', 'no', 'maybe')),
  meal_choice    TEXT,
  music_requests TEXT,
  restrictions   TEXT,
  comment        TEXT,
  created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now')),
  updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%f', 'now'))
);

CREATE TABLE IF NOT EXISTS guest_changes (
  id         INTEGER PRIMARY KEY AUTOINCREMENT,
  guest_id   INTEGER NOT NULL REFERENCES guests(id) ON DELETE CASCADE,
  field_name TEXT NOT NULL,
  old_value  TEXT,
  new_value  TEXT,
  changed_at TEXT NOT NULL,
  changed_by TEXT NOT NULL DEFAULT 'admin'
);

CREATE INDEX IF NOT EXISTS idx_guests_family ON guests(family_id);
CREATE INDEX IF NOT EXISTS idx_guest_changes_guest ON guest_changes(guest_id);
CREATE INDEX IF NOT EXISTS idx_guest_changes_at ON guest_changes(changed_at);
"#;

/// Create tables and indexes if they don't exist yet.
/// Cascade delete from guests to guest_changes relies on the pool being
/// opened with foreign keys enabled.
pub async fn init(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::raw_sql(SQL_SCHEMA).execute(pool).await?;
    Ok(())
}
