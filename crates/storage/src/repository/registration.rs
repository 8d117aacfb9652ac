use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Registration, ScoringScope};

/// Repository for participant registrations
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the registrations of a scope in registration order
    pub async fn list_for_scope(&self, scope: &ScoringScope) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, event_id, category_id, subcategory_id,
                   participant_name, song_title, song_duration, created_at
            FROM registrations
            WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3
            ORDER BY created_at ASC, registration_id ASC
            "#,
        )
        .bind(scope.event_id)
        .bind(scope.category_id)
        .bind(scope.subcategory_id)
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }
}
