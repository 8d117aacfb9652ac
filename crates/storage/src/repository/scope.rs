use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::{ScopeLabel, ScoringScope};

/// Repository resolving scope ids to display names
pub struct ScopeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScopeRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn describe(&self, scope: &ScoringScope) -> Result<ScopeLabel> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT e.title, c.name, s.name
            FROM events e
            INNER JOIN event_categories c ON c.event_id = e.event_id
            INNER JOIN event_subcategories s ON s.category_id = c.category_id
            WHERE e.event_id = $1 AND c.category_id = $2 AND s.subcategory_id = $3
            "#,
        )
        .bind(scope.event_id)
        .bind(scope.category_id)
        .bind(scope.subcategory_id)
        .fetch_optional(self.pool)
        .await?;

        let (event_title, category_name, subcategory_name) = row.ok_or(StorageError::NotFound)?;

        Ok(ScopeLabel {
            event_title,
            category_name,
            subcategory_name,
        })
    }
}
