use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ScoringScope;

/// Prize band configured by an administrator for one scope
///
/// `min_score` and `max_score` are inclusive; `None` leaves that side unbounded.
/// Tiers are processed by ascending `display_order`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PrizeConfiguration {
    pub prize_id: Uuid,
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub prize_level: String,
    pub max_winners: i32,
    pub min_score: Option<Decimal>,
    pub max_score: Option<Decimal>,
    pub display_order: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PrizeConfiguration {
    pub fn scope(&self) -> ScoringScope {
        ScoringScope::new(self.event_id, self.category_id, self.subcategory_id)
    }
}
