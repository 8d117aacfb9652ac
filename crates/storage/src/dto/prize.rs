use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{PrizeConfiguration, PrizeTier, ScoringScope};

/// Request payload for creating a prize tier in a scope
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePrizeConfigurationRequest {
    pub event_id: Uuid,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Prize level must be between 1 and 100 characters"
    ))]
    pub prize_level: String,

    #[validate(range(min = 1, message = "At least one winner is required"))]
    pub max_winners: i32,

    #[validate(custom(function = "validate_score"))]
    pub min_score: Option<Decimal>,

    #[validate(custom(function = "validate_score"))]
    pub max_score: Option<Decimal>,

    #[validate(range(min = 1, message = "Display order must be >= 1"))]
    pub display_order: i32,
}

impl CreatePrizeConfigurationRequest {
    pub fn scope(&self) -> ScoringScope {
        ScoringScope::new(self.event_id, self.category_id, self.subcategory_id)
    }

    pub fn as_tier(&self) -> PrizeTier {
        PrizeTier {
            prize_level: self.prize_level.clone(),
            display_order: self.display_order,
            max_winners: u32::try_from(self.max_winners).unwrap_or(0),
            min_score: self.min_score,
            max_score: self.max_score,
        }
    }
}

/// Request payload replacing the editable fields of a prize tier
///
/// Omitting `min_score` or `max_score` clears that bound. `active` keeps its
/// current value when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePrizeConfigurationRequest {
    #[validate(length(min = 1, max = 100))]
    pub prize_level: String,

    #[validate(range(min = 1))]
    pub max_winners: i32,

    #[validate(custom(function = "validate_score"))]
    pub min_score: Option<Decimal>,

    #[validate(custom(function = "validate_score"))]
    pub max_score: Option<Decimal>,

    #[validate(range(min = 1))]
    pub display_order: i32,

    pub active: Option<bool>,
}

impl UpdatePrizeConfigurationRequest {
    pub fn as_tier(&self) -> PrizeTier {
        PrizeTier {
            prize_level: self.prize_level.clone(),
            display_order: self.display_order,
            max_winners: u32::try_from(self.max_winners).unwrap_or(0),
            min_score: self.min_score,
            max_score: self.max_score,
        }
    }
}

/// Request payload copying every active tier of one scope into another
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CopyPrizeConfigurationsRequest {
    pub from: ScoringScope,
    pub to: ScoringScope,
}

/// Response containing prize tier details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeConfigurationResponse {
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
    pub updated_at: NaiveDateTime,
}

impl From<PrizeConfiguration> for PrizeConfigurationResponse {
    fn from(config: PrizeConfiguration) -> Self {
        Self {
            prize_id: config.prize_id,
            event_id: config.event_id,
            category_id: config.category_id,
            subcategory_id: config.subcategory_id,
            prize_level: config.prize_level,
            max_winners: config.max_winners,
            min_score: config.min_score,
            max_score: config.max_score,
            display_order: config.display_order,
            active: config.active,
            updated_at: config.updated_at,
        }
    }
}

pub(crate) fn validate_score(score: &Decimal) -> Result<(), validator::ValidationError> {
    if *score >= Decimal::ZERO && *score <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(validator::ValidationError::new("score_out_of_range"))
    }
}
