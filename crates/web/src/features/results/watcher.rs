use std::time::Duration;

use storage::{
    Database,
    change_feed::{FeedEvent, ScoringChangeFeed},
    error::{Result, StorageError},
};

use super::board::ResultsBoard;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, PartialEq, Eq)]
enum Next {
    Listen,
    Resubscribe,
}

/// Invalidates board entries as scores and prize tiers change.
///
/// Runs until the process exits. Whenever notifications may have been missed
/// the whole board is dropped.
pub async fn watch_scoring_changes(db: Database, board: ResultsBoard) {
    loop {
        match ScoringChangeFeed::connect(db.pool()).await {
            Ok(mut feed) => {
                while apply_feed_event(&board, feed.recv().await).await == Next::Listen {}
            }
            Err(e) => tracing::error!("Cannot subscribe to scoring changes: {}", e),
        }

        board.invalidate_all().await;
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn apply_feed_event(board: &ResultsBoard, event: Result<FeedEvent>) -> Next {
    match event {
        Ok(FeedEvent::Change(change)) => {
            tracing::debug!(
                table = ?change.table,
                event_id = %change.scope.event_id,
                category_id = %change.scope.category_id,
                subcategory_id = %change.scope.subcategory_id,
                "Scoring change received"
            );
            board.invalidate(&change.scope).await;
            Next::Listen
        }
        Ok(FeedEvent::Interrupted) => {
            tracing::warn!("Scoring change feed lost its connection, dropping cached results");
            board.invalidate_all().await;
            Next::Listen
        }
        Err(StorageError::ChangeFeed(msg)) => {
            tracing::warn!("Ignoring scoring notification: {}", msg);
            Next::Listen
        }
        Err(e) => {
            tracing::error!("Scoring change feed failed: {}", e);
            Next::Resubscribe
        }
    }
}
