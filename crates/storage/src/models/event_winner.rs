use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A prize winner recorded when a scope's scores were finalized.
///
/// `position` keeps the award order: tier by tier, best score first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventWinner {
    pub winner_id: Uuid,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub position: i32,
    pub participant_name: String,
    pub prize_title: String,
    pub created_at: NaiveDateTime,
}
