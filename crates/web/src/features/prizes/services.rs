use sqlx::PgPool;
use storage::{
    dto::prize::{CreatePrizeConfigurationRequest, UpdatePrizeConfigurationRequest},
    error::Result,
    models::{PrizeConfiguration, ScoringScope},
    repository::prize_configuration::PrizeConfigurationRepository,
    services::prize_validation::validate_prize_tier,
};
use uuid::Uuid;

/// List the active prize tiers of a scope
pub async fn list_prize_configurations(
    pool: &PgPool,
    scope: &ScoringScope,
) -> Result<Vec<PrizeConfiguration>> {
    let repo = PrizeConfigurationRepository::new(pool);
    repo.list_active(scope).await
}

/// Create a prize tier after checking it against the scope's other tiers
pub async fn create_prize_configuration(
    pool: &PgPool,
    request: &CreatePrizeConfigurationRequest,
) -> Result<PrizeConfiguration> {
    let repo = PrizeConfigurationRepository::new(pool);

    let existing = repo.list_active(&request.scope()).await?;
    validate_prize_tier(&request.as_tier(), &existing, None)?;

    repo.create(request).await
}

/// Update a prize tier after checking it against the scope's other tiers
pub async fn update_prize_configuration(
    pool: &PgPool,
    prize_id: Uuid,
    request: &UpdatePrizeConfigurationRequest,
) -> Result<PrizeConfiguration> {
    let repo = PrizeConfigurationRepository::new(pool);

    let existing = repo.find_by_id(prize_id).await?;
    let siblings = repo.list_active(&existing.scope()).await?;
    validate_prize_tier(&request.as_tier(), &siblings, Some(prize_id))?;

    repo.update(&existing, request).await
}

/// Delete a prize tier, returning the scope it belonged to
pub async fn delete_prize_configuration(pool: &PgPool, prize_id: Uuid) -> Result<ScoringScope> {
    let repo = PrizeConfigurationRepository::new(pool);
    let existing = repo.find_by_id(prize_id).await?;
    repo.delete(prize_id).await?;
    Ok(existing.scope())
}

/// Replace the tiers of one scope with the active tiers of another
pub async fn copy_prize_configurations(
    pool: &PgPool,
    from: &ScoringScope,
    to: &ScoringScope,
) -> Result<Vec<PrizeConfiguration>> {
    let repo = PrizeConfigurationRepository::new(pool);
    repo.copy_scope(from, to).await
}
