use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgListener;

use crate::error::{Result, StorageError};
use crate::models::ScoringScope;

/// Channel the scoring triggers publish on.
pub const SCORING_CHANNEL: &str = "scoring_changes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedTable {
    Scores,
    Prizes,
}

/// A write to scores or prize configuration within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringChange {
    pub table: ChangedTable,
    pub scope: ScoringScope,
}

#[derive(Deserialize)]
struct ChangePayload {
    table: String,
    event_id: uuid::Uuid,
    category_id: uuid::Uuid,
    subcategory_id: uuid::Uuid,
}

impl ScoringChange {
    pub fn from_payload(payload: &str) -> Result<Self> {
        let raw: ChangePayload = serde_json::from_str(payload)
            .map_err(|e| StorageError::ChangeFeed(format!("malformed payload: {}", e)))?;

        let table = match raw.table.as_str() {
            "event_scoring" => ChangedTable::Scores,
            "event_prize_configurations" => ChangedTable::Prizes,
            other => {
                return Err(StorageError::ChangeFeed(format!(
                    "unexpected table '{}'",
                    other
                )));
            }
        };

        Ok(Self {
            table,
            scope: ScoringScope::new(raw.event_id, raw.category_id, raw.subcategory_id),
        })
    }
}

/// What the feed observed since the previous call to `recv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    Change(ScoringChange),
    /// The connection dropped. The next `recv` reconnects, but anything sent
    /// in between is gone.
    Interrupted,
}

/// Subscription to score and prize configuration changes.
///
/// Only signals that a scope changed; consumers refetch and recompute.
pub struct ScoringChangeFeed {
    listener: PgListener,
}

impl ScoringChangeFeed {
    pub async fn connect(pool: &PgPool) -> Result<Self> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(SCORING_CHANNEL).await?;
        tracing::info!(channel = SCORING_CHANNEL, "Listening for scoring changes");

        Ok(Self { listener })
    }

    /// Waits for the next change, or reports that the connection was lost.
    pub async fn recv(&mut self) -> Result<FeedEvent> {
        match self.listener.try_recv().await? {
            Some(notification) => {
                ScoringChange::from_payload(notification.payload()).map(FeedEvent::Change)
            }
            None => Ok(FeedEvent::Interrupted),
        }
    }
}
