use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::prize::validate_score;
use crate::models::{EventWinner, FieldChange, ScoringHistoryEntry, ScoringScope};

/// A jury member's score submission for one registration
///
/// Submitting again overwrites the jury's previous score unless the row has
/// been finalized. A missing `final_score` records the jury without a score.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    pub registration_id: Uuid,
    pub jury_id: Uuid,

    #[validate(length(min = 1, max = 255))]
    pub jury_name: String,

    #[validate(custom(function = "validate_score"))]
    pub final_score: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinalizeScoresRequest {
    #[serde(flatten)]
    pub scope: ScoringScope,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinalizeScoresResponse {
    pub scope: ScoringScope,
    pub finalized_rows: u64,
    pub winners: Vec<EventWinner>,
}

/// Filters for the scoring history, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ScoringHistoryQuery {
    pub event_id: Option<Uuid>,
    pub registration_id: Option<Uuid>,
    /// Jury who made the change
    pub changed_by: Option<Uuid>,
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

/// A history entry together with the tracked fields it changed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoringHistoryResponse {
    #[serde(flatten)]
    pub entry: ScoringHistoryEntry,
    pub changes: Vec<FieldChange>,
}

impl From<ScoringHistoryEntry> for ScoringHistoryResponse {
    fn from(entry: ScoringHistoryEntry) -> Self {
        Self {
            changes: entry.changes(),
            entry,
        }
    }
}

/// A jury remark attached to a registration
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct JuryRemark {
    pub registration_id: Uuid,
    pub jury_name: String,
    pub remarks: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_limit_bounds() {
        let mut query = ScoringHistoryQuery {
            limit: Some(50),
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        query.limit = Some(0);
        assert!(query.validate().is_err());

        query.limit = None;
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_score_outside_range_rejected() {
        let request = SubmitScoreRequest {
            registration_id: Uuid::from_u128(1),
            jury_id: Uuid::from_u128(2),
            jury_name: "Jury A".to_string(),
            final_score: Some(Decimal::from(120)),
            remarks: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("final_score"));
    }
}
