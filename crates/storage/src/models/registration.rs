use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub participant_name: String,
    pub song_title: Option<String>,
    pub song_duration: Option<String>,
    pub created_at: NaiveDateTime,
}
