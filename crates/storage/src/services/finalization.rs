use sqlx::PgPool;

use super::result_projection::ResultRow;
use super::results::{PgSources, compute_results};
use crate::error::Result;
use crate::models::{EventWinner, ScoringScope};
use crate::repository::scoring::lock_scope;
use crate::repository::winner::replace_winners;

/// A prize winner about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerEntry {
    pub participant_name: String,
    pub prize_title: String,
}

#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    pub finalized_rows: u64,
    pub winners: Vec<EventWinner>,
}

/// Locks the scores of a scope and records its prize winners.
///
/// Existing score rows are locked before the results are computed. The lock
/// and the new winner list commit together.
pub async fn finalize_scope(pool: &PgPool, scope: &ScoringScope) -> Result<FinalizeOutcome> {
    let mut tx = pool.begin().await?;

    let finalized_rows = lock_scope(&mut tx, scope).await?;

    let sources = PgSources::new(pool);
    let snapshot = compute_results(&sources, &sources, &sources, scope).await?;
    let entries = winners_from_rows(&snapshot.projection.rows);
    let winners = replace_winners(&mut tx, scope, &entries).await?;

    tx.commit().await?;

    tracing::info!(
        event_id = %scope.event_id,
        category_id = %scope.category_id,
        subcategory_id = %scope.subcategory_id,
        finalized_rows,
        winners = winners.len(),
        "Scope finalized"
    );

    Ok(FinalizeOutcome {
        finalized_rows,
        winners,
    })
}

/// Rows that won a prize, in ranked order, with title-cased names.
pub fn winners_from_rows(rows: &[ResultRow]) -> Vec<WinnerEntry> {
    rows.iter()
        .filter_map(|row| {
            row.prize_level.as_ref().map(|level| WinnerEntry {
                participant_name: title_case(&row.participant_name),
                prize_title: level.clone(),
            })
        })
        .collect()
}

/// Lowercases a name, then capitalizes each whitespace-separated word and
/// joins the words with single spaces.
pub fn title_case(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
