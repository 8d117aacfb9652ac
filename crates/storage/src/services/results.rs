use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use super::prize_allocation::compute_prize_assignments;
use super::result_projection::{ResultsProjection, project_results};
use super::score_aggregation::{ParticipantIdentity, RawScore, aggregate_scores};
use crate::error::Result;
use crate::models::{PrizeConfiguration, PrizeTier, ScoringScope};
use crate::repository::prize_configuration::PrizeConfigurationRepository;
use crate::repository::registration::RegistrationRepository;
use crate::repository::scoring::ScoringRepository;

/// Supplies the participants of a scope, in registration order.
#[async_trait]
pub trait ParticipantSource: Send + Sync {
    async fn participants(&self, scope: &ScoringScope) -> Result<Vec<ParticipantIdentity>>;
}

/// Supplies raw jury score rows for a set of participants.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn scores(&self, participant_ids: &[Uuid]) -> Result<Vec<RawScore>>;
}

/// Supplies the prize tiers configured for a scope.
#[async_trait]
pub trait PrizeConfigSource: Send + Sync {
    async fn prize_configurations(&self, scope: &ScoringScope) -> Result<Vec<PrizeConfiguration>>;
}

/// All three sources backed by the scoring database.
pub struct PgSources<'a> {
    pool: &'a PgPool,
}

impl<'a> PgSources<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantSource for PgSources<'_> {
    async fn participants(&self, scope: &ScoringScope) -> Result<Vec<ParticipantIdentity>> {
        let registrations = RegistrationRepository::new(self.pool).list_for_scope(scope).await?;
        Ok(registrations.into_iter().map(ParticipantIdentity::from).collect())
    }
}

#[async_trait]
impl ScoreSource for PgSources<'_> {
    async fn scores(&self, participant_ids: &[Uuid]) -> Result<Vec<RawScore>> {
        let rows = ScoringRepository::new(self.pool)
            .list_for_registrations(participant_ids)
            .await?;
        Ok(rows.into_iter().map(RawScore::from).collect())
    }
}

#[async_trait]
impl PrizeConfigSource for PgSources<'_> {
    async fn prize_configurations(&self, scope: &ScoringScope) -> Result<Vec<PrizeConfiguration>> {
        PrizeConfigurationRepository::new(self.pool).list_active(scope).await
    }
}

/// Results of one scope computed from a single snapshot of its data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultsSnapshot {
    pub scope: ScoringScope,
    pub computed_at: NaiveDateTime,
    #[serde(flatten)]
    pub projection: ResultsProjection,
}

/// Fetches a fresh snapshot of a scope and runs aggregation, allocation and
/// projection over it. Nothing is cached between calls.
pub async fn compute_results<P, S, C>(
    participants: &P,
    scores: &S,
    prizes: &C,
    scope: &ScoringScope,
) -> Result<ResultsSnapshot>
where
    P: ParticipantSource + ?Sized,
    S: ScoreSource + ?Sized,
    C: PrizeConfigSource + ?Sized,
{
    let identities = participants.participants(scope).await?;
    let ids: Vec<Uuid> = identities.iter().map(|p| p.id).collect();
    let rows = scores.scores(&ids).await?;
    let tiers: Vec<PrizeTier> = prizes
        .prize_configurations(scope)
        .await?
        .iter()
        .filter(|config| config.active)
        .map(PrizeTier::from)
        .collect();

    let scored = aggregate_scores(&identities, &rows);
    let assignment = compute_prize_assignments(&scored, &tiers);

    tracing::debug!(
        participants = identities.len(),
        score_rows = rows.len(),
        tiers = tiers.len(),
        winners = assignment.winner_count(),
        "Computed results"
    );

    Ok(ResultsSnapshot {
        scope: *scope,
        computed_at: Utc::now().naive_utc(),
        projection: project_results(&assignment),
    })
}
