use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::prize::{CreatePrizeConfigurationRequest, UpdatePrizeConfigurationRequest};
use crate::error::{Result, StorageError};
use crate::models::{PrizeConfiguration, ScoringScope};

const PRIZE_COLUMNS: &str = r#"
    prize_id, event_id, category_id, subcategory_id, prize_level, max_winners,
    min_score, max_score, display_order, active, created_at, updated_at
"#;

/// Repository for prize tier configuration
pub struct PrizeConfigurationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PrizeConfigurationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active tiers of a scope ordered by display order
    pub async fn list_active(&self, scope: &ScoringScope) -> Result<Vec<PrizeConfiguration>> {
        let query = format!(
            r#"
            SELECT {}
            FROM event_prize_configurations
            WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3 AND active
            ORDER BY display_order ASC, created_at ASC
            "#,
            PRIZE_COLUMNS
        );

        let configs = sqlx::query_as::<_, PrizeConfiguration>(&query)
            .bind(scope.event_id)
            .bind(scope.category_id)
            .bind(scope.subcategory_id)
            .fetch_all(self.pool)
            .await?;

        Ok(configs)
    }

    /// Get a tier by ID
    pub async fn find_by_id(&self, prize_id: Uuid) -> Result<PrizeConfiguration> {
        let query = format!(
            "SELECT {} FROM event_prize_configurations WHERE prize_id = $1",
            PRIZE_COLUMNS
        );

        sqlx::query_as::<_, PrizeConfiguration>(&query)
            .bind(prize_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Create a new tier
    pub async fn create(
        &self,
        req: &CreatePrizeConfigurationRequest,
    ) -> Result<PrizeConfiguration> {
        let query = format!(
            r#"
            INSERT INTO event_prize_configurations (
                event_id, category_id, subcategory_id, prize_level, max_winners,
                min_score, max_score, display_order, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            RETURNING {}
            "#,
            PRIZE_COLUMNS
        );

        sqlx::query_as::<_, PrizeConfiguration>(&query)
            .bind(req.event_id)
            .bind(req.category_id)
            .bind(req.subcategory_id)
            .bind(&req.prize_level)
            .bind(req.max_winners)
            .bind(req.min_score)
            .bind(req.max_score)
            .bind(req.display_order)
            .fetch_one(self.pool)
            .await
            .map_err(|e| map_write_error(e.into()))
    }

    /// Replace the editable fields of a tier
    pub async fn update(
        &self,
        existing: &PrizeConfiguration,
        req: &UpdatePrizeConfigurationRequest,
    ) -> Result<PrizeConfiguration> {
        let query = format!(
            r#"
            UPDATE event_prize_configurations
            SET prize_level = $2,
                max_winners = $3,
                min_score = $4,
                max_score = $5,
                display_order = $6,
                active = $7,
                updated_at = NOW()
            WHERE prize_id = $1
            RETURNING {}
            "#,
            PRIZE_COLUMNS
        );

        sqlx::query_as::<_, PrizeConfiguration>(&query)
            .bind(existing.prize_id)
            .bind(&req.prize_level)
            .bind(req.max_winners)
            .bind(req.min_score)
            .bind(req.max_score)
            .bind(req.display_order)
            .bind(req.active.unwrap_or(existing.active))
            .fetch_optional(self.pool)
            .await
            .map_err(|e| map_write_error(e.into()))?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a tier by ID
    pub async fn delete(&self, prize_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM event_prize_configurations WHERE prize_id = $1")
            .bind(prize_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Replace every tier of `to` with copies of the active tiers of `from`
    pub async fn copy_scope(
        &self,
        from: &ScoringScope,
        to: &ScoringScope,
    ) -> Result<Vec<PrizeConfiguration>> {
        if from == to {
            return Err(StorageError::ConstraintViolation(
                "Source and target scopes must differ".to_string(),
            ));
        }

        let sources = self.list_active(from).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM event_prize_configurations
            WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3
            "#,
        )
        .bind(to.event_id)
        .bind(to.category_id)
        .bind(to.subcategory_id)
        .execute(&mut *tx)
        .await?;

        let mut copies = Vec::with_capacity(sources.len());
        for source in &sources {
            copies.push(insert_copy(&mut tx, source, to).await?);
        }

        tx.commit().await?;

        Ok(copies)
    }
}

async fn insert_copy(
    tx: &mut Transaction<'_, Postgres>,
    source: &PrizeConfiguration,
    to: &ScoringScope,
) -> Result<PrizeConfiguration> {
    let query = format!(
        r#"
        INSERT INTO event_prize_configurations (
            event_id, category_id, subcategory_id, prize_level, max_winners,
            min_score, max_score, display_order, active
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
        RETURNING {}
        "#,
        PRIZE_COLUMNS
    );

    sqlx::query_as::<_, PrizeConfiguration>(&query)
        .bind(to.event_id)
        .bind(to.category_id)
        .bind(to.subcategory_id)
        .bind(&source.prize_level)
        .bind(source.max_winners)
        .bind(source.min_score)
        .bind(source.max_score)
        .bind(source.display_order)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| map_write_error(e.into()))
}

fn map_write_error(error: StorageError) -> StorageError {
    if error.is_unique_violation() {
        StorageError::ConstraintViolation(
            "Display order is already used in this category".to_string(),
        )
    } else if error.is_foreign_key_violation() {
        StorageError::NotFound
    } else {
        error
    }
}
