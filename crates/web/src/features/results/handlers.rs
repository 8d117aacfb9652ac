use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use storage::{Database, models::ScoringScope, services::results::ResultsSnapshot};

use crate::error::WebError;

use super::{board::ResultsBoard, export, services};

#[utoipa::path(
    get,
    path = "/api/results",
    params(ScoringScope),
    responses(
        (status = 200, description = "Ranked results with prize assignments", body = ResultsSnapshot)
    ),
    tag = "results"
)]
pub async fn get_results(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Query(scope): Query<ScoringScope>,
) -> Result<Response, WebError> {
    let snapshot = services::current_results(&db, &board, &scope).await?;

    Ok(Json(snapshot.as_ref()).into_response())
}

#[utoipa::path(
    get,
    path = "/api/results/export",
    params(ScoringScope),
    responses(
        (status = 200, description = "Results as a CSV attachment", body = String, content_type = "text/csv"),
        (status = 400, description = "No results to export"),
        (status = 404, description = "Unknown event, category or subcategory")
    ),
    tag = "results"
)]
pub async fn export_results(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Query(scope): Query<ScoringScope>,
) -> Result<Response, WebError> {
    let label = services::describe_scope(&db, &scope).await?;
    let snapshot = services::current_results(&db, &board, &scope).await?;

    if snapshot.projection.rows.is_empty() {
        return Err(WebError::BadRequest(
            "No results available to export".to_string(),
        ));
    }

    let remarks = services::remarks_by_participant(&db, &scope).await?;
    let csv = export::render_csv(&snapshot.projection.rows, &remarks);
    let file_name = export::export_file_name(&label, Utc::now().date_naive());

    tracing::info!(
        rows = snapshot.projection.rows.len(),
        file_name = %file_name,
        "Exporting results"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
        .into_response())
}
