use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PrizeConfiguration;

/// Allocator view of a prize band: ordering, winner cap and eligible range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrizeTier {
    pub prize_level: String,
    pub display_order: i32,
    pub max_winners: u32,
    pub min_score: Option<Decimal>,
    pub max_score: Option<Decimal>,
}

impl PrizeTier {
    /// Whether `score` falls inside the inclusive bounds, a missing bound
    /// being unbounded on that side.
    pub fn accepts(&self, score: Decimal) -> bool {
        self.min_score.is_none_or(|min| score >= min)
            && self.max_score.is_none_or(|max| score <= max)
    }
}

impl From<&PrizeConfiguration> for PrizeTier {
    fn from(config: &PrizeConfiguration) -> Self {
        Self {
            prize_level: config.prize_level.clone(),
            display_order: config.display_order,
            max_winners: u32::try_from(config.max_winners).unwrap_or(0),
            min_score: config.min_score,
            max_score: config.max_score,
        }
    }
}
