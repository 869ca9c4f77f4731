use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GuestRow {
    pub id: i64,
    pub name: String,
    pub family_id: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: Option<String>,
    pub attending: String,
    pub meal_choice: Option<String>,
    pub music_requests: Option<String>,
    pub restrictions: Option<String>,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
