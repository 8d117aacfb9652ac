use sqlx::{PgPool, Postgres, Transaction};

use crate::dto::scoring::ScoringHistoryQuery;
use crate::error::Result;
use crate::models::{EventScoring, ScoringHistoryEntry, ScoringOperation};

/// Repository for the scoring audit trail
pub struct ScoringHistoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoringHistoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent changes first; absent filters match everything
    pub async fn list(&self, filter: &ScoringHistoryQuery) -> Result<Vec<ScoringHistoryEntry>> {
        let entries = sqlx::query_as::<_, ScoringHistoryEntry>(
            r#"
            SELECT history_id, record_id, operation, before_data, after_data,
                   changed_by, jury_name, event_id, category_id, subcategory_id,
                   registration_id, participant_name, changed_at
            FROM event_scoring_history
            WHERE ($1::uuid IS NULL OR event_id = $1)
              AND ($2::uuid IS NULL OR registration_id = $2)
              AND ($3::uuid IS NULL OR changed_by = $3)
            ORDER BY changed_at DESC, history_id ASC
            LIMIT $4
            "#,
        )
        .bind(filter.event_id)
        .bind(filter.registration_id)
        .bind(filter.changed_by)
        .bind(filter.limit)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}

/// Append a history row for a score submission made by the row's jury
pub(crate) async fn record_history(
    tx: &mut Transaction<'_, Postgres>,
    operation: ScoringOperation,
    before: Option<&EventScoring>,
    after: &EventScoring,
) -> Result<()> {
    let before_data = before.map(serde_json::to_value).transpose()?;
    let after_data = serde_json::to_value(after)?;

    sqlx::query(
        r#"
        INSERT INTO event_scoring_history (
            record_id, operation, before_data, after_data, changed_by, jury_name,
            event_id, category_id, subcategory_id, registration_id, participant_name
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            (SELECT participant_name FROM registrations WHERE registration_id = $10)
        )
        "#,
    )
    .bind(after.scoring_id)
    .bind(operation.as_str())
    .bind(before_data)
    .bind(after_data)
    .bind(after.jury_id)
    .bind(&after.jury_name)
    .bind(after.event_id)
    .bind(after.category_id)
    .bind(after.subcategory_id)
    .bind(after.registration_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
