use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GuestChangeRow {
    pub id: i64,
    pub guest_id: i64,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_at: String,
    pub changed_by: String,
}

/// Change row joined with the guest's *current* name at read time.
/// If the guest was renamed after the change, history shows the new name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GuestChangeWithGuestRow {
    pub id: i64,
    pub guest_id: i64,
    pub guest_name: Option<String>,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_at: String,
    pub changed_by: String,
}
