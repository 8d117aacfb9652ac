use sqlx::{Postgres, Transaction};

use crate::error::Result;
use crate::models::{EventWinner, ScoringScope};
use crate::services::finalization::WinnerEntry;

/// Replace the recorded winners of a scope, keeping the order of `winners`
pub(crate) async fn replace_winners(
    tx: &mut Transaction<'_, Postgres>,
    scope: &ScoringScope,
    winners: &[WinnerEntry],
) -> Result<Vec<EventWinner>> {
    sqlx::query(
        r#"
        DELETE FROM event_winners
        WHERE event_id = $1 AND category_id = $2 AND subcategory_id = $3
        "#,
    )
    .bind(scope.event_id)
    .bind(scope.category_id)
    .bind(scope.subcategory_id)
    .execute(&mut **tx)
    .await?;

    let mut recorded = Vec::with_capacity(winners.len());
    for (index, winner) in winners.iter().enumerate() {
        let row = sqlx::query_as::<_, EventWinner>(
            r#"
            INSERT INTO event_winners (
                event_id, category_id, subcategory_id, position, participant_name, prize_title
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING winner_id, event_id, category_id, subcategory_id, position,
                      participant_name, prize_title, created_at
            "#,
        )
        .bind(scope.event_id)
        .bind(scope.category_id)
        .bind(scope.subcategory_id)
        .bind(index as i32 + 1)
        .bind(&winner.participant_name)
        .bind(&winner.prize_title)
        .fetch_one(&mut **tx)
        .await?;

        recorded.push(row);
    }

    Ok(recorded)
}
