use std::collections::HashMap;
use std::sync::Arc;

use storage::models::ScoringScope;
use storage::services::results::ResultsSnapshot;
use tokio::sync::RwLock;

/// Outcome of looking a scope up on the board.
pub enum Lookup {
    Cached(Arc<ResultsSnapshot>),
    /// Nothing usable is cached; a snapshot computed from now on may be
    /// stored under this generation.
    Miss { generation: u64 },
}

struct Entry {
    generation: u64,
    snapshot: Option<Arc<ResultsSnapshot>>,
}

#[derive(Default)]
struct Slots {
    /// Bumped by every invalidation.
    version: u64,
    /// Generation of scopes without an entry, raised by `invalidate_all`.
    floor: u64,
    entries: HashMap<ScoringScope, Entry>,
}

impl Slots {
    fn generation(&self, scope: &ScoringScope) -> u64 {
        self.entries
            .get(scope)
            .map_or(self.floor, |entry| entry.generation)
    }
}

/// Last computed results per scope.
///
/// Every invalidation moves the scope to a new generation. A snapshot is only
/// kept if no invalidation happened since its computation started, so a slow
/// recompute never replaces the outcome of a newer one.
#[derive(Clone)]
pub struct ResultsBoard {
    slots: Arc<RwLock<Slots>>,
    caching: bool,
}

impl ResultsBoard {
    /// A board that caches only makes sense while change notifications keep
    /// it honest; without them every lookup misses.
    pub fn new(caching: bool) -> Self {
        Self {
            slots: Arc::new(RwLock::new(Slots::default())),
            caching,
        }
    }

    pub async fn lookup(&self, scope: &ScoringScope) -> Lookup {
        let slots = self.slots.read().await;
        match slots.entries.get(scope) {
            Some(Entry {
                snapshot: Some(snapshot),
                ..
            }) if self.caching => Lookup::Cached(Arc::clone(snapshot)),
            _ => Lookup::Miss {
                generation: slots.generation(scope),
            },
        }
    }

    /// Keeps `snapshot` if the scope is still at `generation`.
    pub async fn store(
        &self,
        scope: ScoringScope,
        generation: u64,
        snapshot: ResultsSnapshot,
    ) -> Arc<ResultsSnapshot> {
        let snapshot = Arc::new(snapshot);
        if !self.caching {
            return snapshot;
        }

        let mut slots = self.slots.write().await;
        if slots.generation(&scope) == generation {
            slots.entries.insert(
                scope,
                Entry {
                    generation,
                    snapshot: Some(Arc::clone(&snapshot)),
                },
            );
        }

        snapshot
    }

    pub async fn invalidate(&self, scope: &ScoringScope) {
        let mut slots = self.slots.write().await;
        slots.version += 1;
        let generation = slots.version;
        slots.entries.insert(
            *scope,
            Entry {
                generation,
                snapshot: None,
            },
        );
    }

    /// Drops every cached snapshot, used when change notifications may have
    /// been missed.
    pub async fn invalidate_all(&self) {
        let mut slots = self.slots.write().await;
        slots.version += 1;
        slots.floor = slots.version;
        slots.entries.clear();
    }
}
