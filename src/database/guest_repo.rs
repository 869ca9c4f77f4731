use sqlx::{SqliteConnection, SqlitePool};

use crate::models::GuestRow;

pub const SQL_LIST_ALL: &str = r#"
SELECT
  id,
  name,
  family_id,
  email,
  mobile,
  address,
  attending,
  meal_choice,
  music_requests,
  restrictions,
  comment,
  created_at,
  updated_at
FROM guests
ORDER BY name ASC, id ASC
"#;

pub async fn list_all(pool: &SqlitePool) -> sqlx::Result<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(SQL_LIST_ALL)
        .fetch_all(pool)
        .await
}

pub const SQL_LIST_BY_FAMILY: &str = r#"
SELECT
  id,
  name,
  family_id,
  email,
  mobile,
  address,
  attending,
  meal_choice,
  music_requests,
  restrictions,
  comment,
  created_at,
  updated_at
FROM guests
WHERE family_id = ?1
ORDER BY name ASC, id ASC
"#;

pub async fn list_by_family(pool: &SqlitePool, family_id: &str) -> sqlx::Result<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(SQL_LIST_BY_FAMILY)
        .bind(family_id)
        .fetch_all(pool)
        .await
}

pub const SQL_LIST_UNASSIGNED: &str = r#"
SELECT
  id,
  name,
  family_id,
  email,
  mobile,
  address,
  attending,
  meal_choice,
  music_requests,
  restrictions,
  comment,
  created_at,
  updated_at
FROM guests
WHERE family_id IS NULL OR family_id = ''
ORDER BY name ASC, id ASC
"#;

pub async fn list_unassigned(pool: &SqlitePool) -> sqlx::Result<Vec<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(SQL_LIST_UNASSIGNED)
        .fetch_all(pool)
        .await
}

pub const SQL_FIND_BY_ID: &str = r#"
SELECT
  id,
  name,
  family_id,
  email,
  mobile,
  address,
  attending,
  meal_choice,
  music_requests,
  restrictions,
  comment,
  created_at,
  updated_at
FROM guests
WHERE id = ?1
LIMIT 1
"#;

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    guest_id: i64,
) -> sqlx::Result<Option<GuestRow>> {
    sqlx::query_as::<_, GuestRow>(SQL_FIND_BY_ID)
        .bind(guest_id)
        .fetch_optional(conn)
        .await
}

/// Apply one update touching all changed columns plus updated_at in a single
/// write. Column names come from the closed UpdatableField set, never from
/// client input.
pub async fn apply_field_update(
    conn: &mut SqliteConnection,
    guest_id: i64,
    changes: &[(&'static str, Option<&str>)],
    updated_at: &str,
) -> sqlx::Result<u64> {
    let mut sql = String::from("UPDATE guests SET ");
    for (i, (column, _)) in changes.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(column);
        sql.push_str(" = ?");
    }
    sql.push_str(", updated_at = ? WHERE id = ?");

    let mut query = sqlx::query(&sql);
    for (_, value) in changes {
        query = query.bind(*value);
    }
    let result = query.bind(updated_at).bind(guest_id).execute(conn).await?;
    Ok(result.rows_affected())
}

pub struct NewGuest<'a> {
    pub name: &'a str,
    pub family_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub mobile: Option<&'a str>,
    pub address: Option<&'a str>,
    pub attending: &'a str,
}

const SQL_INSERT_GUEST: &str = r#"
INSERT INTO guests (
  name,
  family_id,
  email,
  mobile,
  address,
  attending
) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub async fn insert_guest(pool: &SqlitePool, guest: NewGuest<'_>) -> sqlx::Result<i64> {
    let result = sqlx::query(SQL_INSERT_GUEST)
        .bind(guest.name)
        .bind(guest.family_id)
        .bind(guest.email)
        .bind(guest.mobile)
        .bind(guest.address)
        .bind(guest.attending)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn delete_guest(pool: &SqlitePool, guest_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM guests WHERE id = ?1")
        .bind(guest_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[derive(Debug, sqlx::FromRow)]
pub struct GuestStatsRow {
    pub total: i64,
    pub attending: i64,
    pub not_attending: i64,
    pub pending: i64,
}

pub const SQL_LOAD_STATS: &str = r#"
SELECT
  COUNT(*) AS total,
  COALESCE(SUM(CASE WHEN attending = 'yes' THEN 1 ELSE 0 END), 0) AS attending,
  COALESCE(SUM(CASE WHEN attending = 'no' THEN 1 ELSE 0 END), 0) AS not_attending,
  COALESCE(SUM(CASE WHEN attending = 'maybe' THEN 1 ELSE 0 END), 0) AS pending
FROM guests
"#;

pub async fn load_stats(pool: &SqlitePool) -> sqlx::Result<GuestStatsRow> {
    sqlx::query_as::<_, GuestStatsRow>(SQL_LOAD_STATS)
        .fetch_one(pool)
        .await
}
