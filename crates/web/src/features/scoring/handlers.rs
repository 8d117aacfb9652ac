use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoring::{
        FinalizeScoresRequest, FinalizeScoresResponse, ScoringHistoryQuery,
        ScoringHistoryResponse, SubmitScoreRequest,
    },
    models::{EventScoring, ScoringScope},
};
use validator::Validate;

use crate::error::WebError;
use crate::features::results::board::ResultsBoard;

use super::services;

#[utoipa::path(
    put,
    path = "/api/scores",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = EventScoring),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Scores have been finalized")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let row = services::submit_score(db.pool(), &payload).await?;
    board
        .invalidate(&ScoringScope::new(row.event_id, row.category_id, row.subcategory_id))
        .await;

    Ok(Json(row).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scores/finalize",
    request_body = FinalizeScoresRequest,
    responses(
        (status = 200, description = "Scores of the scope finalized and winners recorded", body = FinalizeScoresResponse)
    ),
    tag = "scores"
)]
pub async fn finalize_scores(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Json(payload): Json<FinalizeScoresRequest>,
) -> Result<Response, WebError> {
    let outcome = services::finalize_scores(db.pool(), &payload.scope).await?;
    board.invalidate(&payload.scope).await;

    Ok(Json(FinalizeScoresResponse {
        scope: payload.scope,
        finalized_rows: outcome.finalized_rows,
        winners: outcome.winners,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores/history",
    params(ScoringHistoryQuery),
    responses(
        (status = 200, description = "Score changes, newest first", body = Vec<ScoringHistoryResponse>),
        (status = 400, description = "Invalid filters")
    ),
    tag = "scores"
)]
pub async fn list_scoring_history(
    State(db): State<Database>,
    Query(filter): Query<ScoringHistoryQuery>,
) -> Result<Response, WebError> {
    filter.validate()?;

    let entries = services::list_history(db.pool(), &filter).await?;

    let response: Vec<ScoringHistoryResponse> = entries
        .into_iter()
        .map(ScoringHistoryResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
