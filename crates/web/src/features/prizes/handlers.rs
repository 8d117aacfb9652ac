use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::prize::{
        CopyPrizeConfigurationsRequest, CreatePrizeConfigurationRequest,
        PrizeConfigurationResponse, UpdatePrizeConfigurationRequest,
    },
    models::ScoringScope,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::features::results::board::ResultsBoard;

use super::services;

#[utoipa::path(
    get,
    path = "/api/prizes",
    params(ScoringScope),
    responses(
        (status = 200, description = "Active prize tiers ordered by display order", body = Vec<PrizeConfigurationResponse>)
    ),
    tag = "prizes"
)]
pub async fn list_prize_configurations(
    State(db): State<Database>,
    Query(scope): Query<ScoringScope>,
) -> Result<Json<Vec<PrizeConfigurationResponse>>, WebError> {
    let configs = services::list_prize_configurations(db.pool(), &scope).await?;

    let response: Vec<PrizeConfigurationResponse> = configs
        .into_iter()
        .map(PrizeConfigurationResponse::from)
        .collect();

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/prizes",
    request_body = CreatePrizeConfigurationRequest,
    responses(
        (status = 201, description = "Prize tier created", body = PrizeConfigurationResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Overlapping range or display order already used")
    ),
    tag = "prizes"
)]
pub async fn create_prize_configuration(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Json(payload): Json<CreatePrizeConfigurationRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let config = services::create_prize_configuration(db.pool(), &payload).await?;
    board.invalidate(&config.scope()).await;

    tracing::info!(
        prize_id = %config.prize_id,
        prize_level = %config.prize_level,
        "Prize tier created"
    );

    Ok((
        StatusCode::CREATED,
        Json(PrizeConfigurationResponse::from(config)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/prizes/{prize_id}",
    params(
        ("prize_id" = Uuid, Path, description = "Prize tier ID")
    ),
    request_body = UpdatePrizeConfigurationRequest,
    responses(
        (status = 200, description = "Prize tier updated", body = PrizeConfigurationResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Prize tier not found"),
        (status = 409, description = "Overlapping range or display order already used")
    ),
    tag = "prizes"
)]
pub async fn update_prize_configuration(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Path(prize_id): Path<Uuid>,
    Json(payload): Json<UpdatePrizeConfigurationRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let config = services::update_prize_configuration(db.pool(), prize_id, &payload).await?;
    board.invalidate(&config.scope()).await;

    Ok(Json(PrizeConfigurationResponse::from(config)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/prizes/{prize_id}",
    params(
        ("prize_id" = Uuid, Path, description = "Prize tier ID")
    ),
    responses(
        (status = 204, description = "Prize tier deleted"),
        (status = 404, description = "Prize tier not found")
    ),
    tag = "prizes"
)]
pub async fn delete_prize_configuration(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Path(prize_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let scope = services::delete_prize_configuration(db.pool(), prize_id).await?;
    board.invalidate(&scope).await;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/prizes/copy",
    request_body = CopyPrizeConfigurationsRequest,
    responses(
        (status = 200, description = "Target scope now holds copies of the source tiers", body = Vec<PrizeConfigurationResponse>),
        (status = 409, description = "Source and target are the same scope")
    ),
    tag = "prizes"
)]
pub async fn copy_prize_configurations(
    State(db): State<Database>,
    State(board): State<ResultsBoard>,
    Json(payload): Json<CopyPrizeConfigurationsRequest>,
) -> Result<Response, WebError> {
    let copies = services::copy_prize_configurations(db.pool(), &payload.from, &payload.to).await?;
    board.invalidate(&payload.to).await;

    tracing::info!(copied = copies.len(), "Prize tiers copied");

    let response: Vec<PrizeConfigurationResponse> = copies
        .into_iter()
        .map(PrizeConfigurationResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
