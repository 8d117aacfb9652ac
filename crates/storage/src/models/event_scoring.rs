use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One jury member's score for one registration.
///
/// `final_score` stays `None` until the jury submits; `finalized` is set by an
/// administrator and freezes the row against further edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventScoring {
    pub scoring_id: Uuid,
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub jury_id: Uuid,
    pub jury_name: String,
    pub final_score: Option<Decimal>,
    pub remarks: Option<String>,
    pub finalized: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
