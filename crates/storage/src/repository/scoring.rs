use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::scoring_history::record_history;
use crate::dto::scoring::{JuryRemark, SubmitScoreRequest};
use crate::error::{Result, StorageError};
use crate::models::{EventScoring, ScoringOperation, ScoringScope};

const SCORING_COLUMNS: &str = r#"
    scoring_id, registration_id, event_id, category_id, subcategory_id,
    jury_id, jury_name, final_score, remarks, finalized, created_at, updated_at
"#;

/// Repository for jury score rows
pub struct ScoringRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoringRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All score rows for the given registrations
    pub async fn list_for_registrations(
        &self,
        registration_ids: &[Uuid],
    ) -> Result<Vec<EventScoring>> {
        if registration_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            r#"
            SELECT {}
            FROM event_scoring
            WHERE registration_id = ANY($1)
            ORDER BY created_at ASC, scoring_id ASC
            "#,
            SCORING_COLUMNS
        );

        let rows = sqlx::query_as::<_, EventScoring>(&query)
            .bind(registration_ids)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Insert or overwrite a jury's score for a registration
    ///
    /// The scope columns are copied from the registration. Finalized rows are
    /// never overwritten. Every accepted submission is written to the scoring
    /// history in the same transaction.
    pub async fn submit(&self, req: &SubmitScoreRequest) -> Result<EventScoring> {
        let mut tx = self.pool.begin().await?;

        let select = format!(
            r#"
            SELECT {}
            FROM event_scoring
            WHERE registration_id = $1 AND jury_id = $2
            FOR UPDATE
            "#,
            SCORING_COLUMNS
        );

        let previous = sqlx::query_as::<_, EventScoring>(&select)
            .bind(req.registration_id)
            .bind(req.jury_id)
            .fetch_optional(&mut *tx)
            .await?;

        if previous.as_ref().is_some_and(|row| row.finalized) {
            return Err(StorageError::ConstraintViolation(
                "Scores for this participant have been finalized".to_string(),
            ));
        }

        let upsert = format!(
            r#"
            INSERT INTO event_scoring (
                registration_id, event_id, category_id, subcategory_id,
                jury_id, jury_name, final_score, remarks
            )
            SELECT r.registration_id, r.event_id, r.category_id, r.subcategory_id, $2, $3, $4, $5
            FROM registrations r
            WHERE r.registration_id = $1
            ON CONFLICT (registration_id, jury_id) DO UPDATE
            SET jury_name = EXCLUDED.jury_name,
                final_score = EXCLUDED.final_score,
                remarks = EXCLUDED.remarks,
                updated_at = NOW()
            WHERE event_scoring.finalized = FALSE
            RETURNING {}
            "#,
            SCORING_COLUMNS
        );

        let row = sqlx::query_as::<_, EventScoring>(&upsert)
            .bind(req.registration_id)
            .bind(req.jury_id)
            .bind(&req.jury_name)
            .bind(req.final_score)
            .bind(&req.remarks)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::NotFound)?;

        let operation = if previous.is_some() {
            ScoringOperation::Update
        } else {
            ScoringOperation::Insert
        };
        record_history(&mut tx, operation, previous.as_ref(), &row).await?;

        tx.commit().await?;

        Ok(row)
    }

    /// Non-empty jury remarks of a scope
    pub async fn remarks_for_scope(&self, scope: &ScoringScope) -> Result<Vec<JuryRemark>> {
        let remarks = sqlx::query_as::<_, JuryRemark>(
            r#"
            SELECT registration_id, jury_name, remarks
            FROM event_scoring
            WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3
              AND remarks IS NOT NULL AND remarks <> ''
            ORDER BY created_at ASC, scoring_id ASC
            "#,
        )
        .bind(scope.event_id)
        .bind(scope.category_id)
        .bind(scope.subcategory_id)
        .fetch_all(self.pool)
        .await?;

        Ok(remarks)
    }
}

/// Lock every score row of a scope, returning how many rows changed
pub(crate) async fn lock_scope(
    tx: &mut Transaction<'_, Postgres>,
    scope: &ScoringScope,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE event_scoring
        SET finalized = TRUE, updated_at = NOW()
        WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3
          AND finalized = FALSE
        "#,
    )
    .bind(scope.event_id)
    .bind(scope.category_id)
    .bind(scope.subcategory_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}
