use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use storage::{
    Database,
    error::Result,
    models::{ScopeLabel, ScoringScope},
    repository::{scope::ScopeRepository, scoring::ScoringRepository},
    services::results::{PgSources, ResultsSnapshot, compute_results},
};
use uuid::Uuid;

use super::board::{Lookup, ResultsBoard};

/// Results of a scope, from the board when still current, otherwise
/// recomputed from a fresh snapshot
pub async fn current_results(
    db: &Database,
    board: &ResultsBoard,
    scope: &ScoringScope,
) -> Result<Arc<ResultsSnapshot>> {
    match board.lookup(scope).await {
        Lookup::Cached(snapshot) => Ok(snapshot),
        Lookup::Miss { generation } => {
            let sources = PgSources::new(db.pool());
            let snapshot = compute_results(&sources, &sources, &sources, scope).await?;
            Ok(board.store(*scope, generation, snapshot).await)
        }
    }
}

/// Jury remarks of a scope grouped by registration, keyed by jury name
pub async fn remarks_by_participant(
    db: &Database,
    scope: &ScoringScope,
) -> Result<HashMap<Uuid, BTreeMap<String, String>>> {
    let remarks = ScoringRepository::new(db.pool())
        .remarks_for_scope(scope)
        .await?;

    let mut grouped: HashMap<Uuid, BTreeMap<String, String>> = HashMap::new();
    for remark in remarks {
        grouped
            .entry(remark.registration_id)
            .or_default()
            .insert(remark.jury_name, remark.remarks);
    }

    Ok(grouped)
}

pub async fn describe_scope(db: &Database, scope: &ScoringScope) -> Result<ScopeLabel> {
    ScopeRepository::new(db.pool()).describe(scope).await
}
