use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A jury score that contributed to a participant's average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JuryScore {
    pub jury_id: Uuid,
    pub jury_name: String,
    pub score: Decimal,
}

/// A participant together with the summary of their jury scores.
///
/// Always derived from raw score rows, never persisted. `average_score` is
/// zero and meaningless while `score_count` is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoredParticipant {
    pub id: Uuid,
    pub name: String,
    pub average_score: Decimal,
    pub score_count: u32,
    pub jury_scores: Vec<JuryScore>,
    pub is_finalized: bool,
}

impl ScoredParticipant {
    pub fn has_scores(&self) -> bool {
        self.score_count > 0
    }
}
