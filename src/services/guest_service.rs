use std::fmt;

use serde_json::Value;
use sqlx::SqlitePool;

use crate::database::guest_changes_repo::{self, NewGuestChange};
use crate::database::guest_repo;
use crate::models::GuestRow;

/// Actor recorded on audit rows when the request carries no admin identity.
pub const SYSTEM_ACTOR: &str = "admin";

/// The closed set of guest columns the update endpoint may touch.
/// Everything else on the row (id, created_at, updated_at) is managed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatableField {
    Name,
    FamilyId,
    Email,
    Mobile,
    Address,
    Attending,
    MealChoice,
    MusicRequests,
    Restrictions,
    Comment,
}

impl UpdatableField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "family_id" => Some(Self::FamilyId),
            "email" => Some(Self::Email),
            "mobile" => Some(Self::Mobile),
            "address" => Some(Self::Address),
            "attending" => Some(Self::Attending),
            "meal_choice" => Some(Self::MealChoice),
            "music_requests" => Some(Self::MusicRequests),
            "restrictions" => Some(Self::Restrictions),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FamilyId => "family_id",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Address => "address",
            Self::Attending => "attending",
            Self::MealChoice => "meal_choice",
            Self::MusicRequests => "music_requests",
            Self::Restrictions => "restrictions",
            Self::Comment => "comment",
        }
    }
}

pub const ATTENDING_VALUES: [&str; 3] = ["yes", "no", "maybe"];

fn is_valid_attending(value: &str) -> bool {
    ATTENDING_VALUES.contains(&value)
}

#[derive(Debug)]
pub enum ValidationError {
    UnknownField(String),
    InvalidAttending(String),
    InvalidValue(&'static str),
    EmptyName,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "INVALID_FIELD",
            Self::InvalidAttending(_) => "INVALID_ATTENDING",
            Self::InvalidValue(_) => "INVALID_VALUE",
            Self::EmptyName => "EMPTY_NAME",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "'{}' is not an updatable field", name),
            Self::InvalidAttending(value) => {
                write!(f, "attending must be one of yes/no/maybe, got '{}'", value)
            }
            Self::InvalidValue(field) => {
                write!(f, "'{}' must be a string or null", field)
            }
            Self::EmptyName => write!(f, "name must be a non-empty string"),
        }
    }
}

#[derive(Debug)]
pub enum GuestUpdateError {
    Validation(ValidationError),
    NotFound,
    Storage(sqlx::Error),
}

impl fmt::Display for GuestUpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation failed: {}", e),
            Self::NotFound => write!(f, "guest not found"),
            Self::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl From<ValidationError> for GuestUpdateError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<sqlx::Error> for GuestUpdateError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e)
    }
}

pub struct GuestUpdate {
    pub guest: GuestRow,
    pub updated_fields: Vec<String>,
}

/// Validate the raw JSON body into (field, value) pairs drawn from the
/// closed field set. Values must be strings or null.
fn validate_fields(
    fields: &serde_json::Map<String, Value>,
) -> Result<Vec<(UpdatableField, Option<String>)>, ValidationError> {
    let mut updates = Vec::with_capacity(fields.len());

    for (key, value) in fields {
        let field = UpdatableField::parse(key)
            .ok_or_else(|| ValidationError::UnknownField(key.clone()))?;

        let value = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            _ => return Err(ValidationError::InvalidValue(field.column())),
        };

        match field {
            UpdatableField::Attending => {
                let Some(v) = value.as_deref().filter(|v| is_valid_attending(v)) else {
                    return Err(ValidationError::InvalidAttending(
                        value.unwrap_or_else(|| "null".to_string()),
                    ));
                };
                updates.push((field, Some(v.to_string())));
            }
            UpdatableField::Name => {
                let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) else {
                    return Err(ValidationError::EmptyName);
                };
                updates.push((field, Some(v.to_string())));
            }
            _ => updates.push((field, value)),
        }
    }

    Ok(updates)
}

fn current_value(guest: &GuestRow, field: UpdatableField) -> Option<&str> {
    match field {
        UpdatableField::Name => Some(&guest.name),
        UpdatableField::FamilyId => guest.family_id.as_deref(),
        UpdatableField::Email => guest.email.as_deref(),
        UpdatableField::Mobile => guest.mobile.as_deref(),
        UpdatableField::Address => guest.address.as_deref(),
        UpdatableField::Attending => Some(&guest.attending),
        UpdatableField::MealChoice => guest.meal_choice.as_deref(),
        UpdatableField::MusicRequests => guest.music_requests.as_deref(),
        UpdatableField::Restrictions => guest.restrictions.as_deref(),
        UpdatableField::Comment => guest.comment.as_deref(),
    }
}

/// Diff the submitted fields against the stored row and apply only the ones
/// that actually differ, writing one audit row per changed field in the same
/// transaction as the guest update. A submission where nothing differs is a
/// successful no-op: updated_at stays put and no audit rows appear.
///
/// Correctness of the read-diff-write sequence relies on SQLite serializing
/// write transactions; there is no application-level lock. When two updates
/// race on the same guest, the last transaction to commit wins per field.
pub async fn update_guest_fields(
    pool: &SqlitePool,
    guest_id: i64,
    fields: &serde_json::Map<String, Value>,
    actor: &str,
) -> Result<GuestUpdate, GuestUpdateError> {
    let updates = validate_fields(fields)?;

    let mut tx = pool.begin().await?;

    let Some(current) = guest_repo::find_by_id(&mut tx, guest_id).await? else {
        return Err(GuestUpdateError::NotFound);
    };

    let mut changed: Vec<(UpdatableField, Option<String>, Option<String>)> = Vec::new();
    for (field, new_value) in updates {
        let old_value = current_value(&current, field).map(str::to_string);
        if old_value.as_deref() != new_value.as_deref() {
            changed.push((field, old_value, new_value));
        }
    }

    if changed.is_empty() {
        tx.rollback().await?;
        return Ok(GuestUpdate {
            guest: current,
            updated_fields: vec![],
        });
    }

    // One timestamp for the guest row and every audit row of this update.
    let now: String = sqlx::query_scalar("SELECT strftime('%Y-%m-%dT%H:%M:%f', 'now')")
        .fetch_one(&mut *tx)
        .await?;

    let columns: Vec<(&'static str, Option<&str>)> = changed
        .iter()
        .map(|(field, _, new_value)| (field.column(), new_value.as_deref()))
        .collect();
    guest_repo::apply_field_update(&mut tx, guest_id, &columns, &now).await?;

    for (field, old_value, new_value) in &changed {
        guest_changes_repo::insert_change(
            &mut tx,
            NewGuestChange {
                guest_id,
                field_name: field.column(),
                old_value: old_value.as_deref(),
                new_value: new_value.as_deref(),
                changed_at: &now,
                changed_by: actor,
            },
        )
        .await?;
    }

    let guest = guest_repo::find_by_id(&mut tx, guest_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    tx.commit().await?;

    Ok(GuestUpdate {
        guest,
        updated_fields: changed
            .iter()
            .map(|(field, _, _)| field.column().to_string())
            .collect(),
    })
}
