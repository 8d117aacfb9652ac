use sqlx::PgPool;
use storage::{
    dto::scoring::{ScoringHistoryQuery, SubmitScoreRequest},
    error::Result,
    models::{EventScoring, ScoringHistoryEntry, ScoringScope},
    repository::{scoring::ScoringRepository, scoring_history::ScoringHistoryRepository},
    services::finalization::{self, FinalizeOutcome},
};

/// Record or overwrite a jury's score
pub async fn submit_score(pool: &PgPool, request: &SubmitScoreRequest) -> Result<EventScoring> {
    let repo = ScoringRepository::new(pool);
    repo.submit(request).await
}

/// Lock every score of a scope and record its winners
pub async fn finalize_scores(pool: &PgPool, scope: &ScoringScope) -> Result<FinalizeOutcome> {
    finalization::finalize_scope(pool, scope).await
}

/// Scoring history matching the filters, newest first
pub async fn list_history(
    pool: &PgPool,
    filter: &ScoringHistoryQuery,
) -> Result<Vec<ScoringHistoryEntry>> {
    let repo = ScoringHistoryRepository::new(pool);
    repo.list(filter).await
}
