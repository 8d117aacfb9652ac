use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use features::results::{board::ResultsBoard, watcher::watch_scoring_changes};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::prizes::handlers::list_prize_configurations,
        features::prizes::handlers::create_prize_configuration,
        features::prizes::handlers::update_prize_configuration,
        features::prizes::handlers::delete_prize_configuration,
        features::prizes::handlers::copy_prize_configurations,
        features::scoring::handlers::submit_score,
        features::scoring::handlers::finalize_scores,
        features::scoring::handlers::list_scoring_history,
        features::results::handlers::get_results,
        features::results::handlers::export_results,
    ),
    components(
        schemas(
            storage::dto::prize::CreatePrizeConfigurationRequest,
            storage::dto::prize::UpdatePrizeConfigurationRequest,
            storage::dto::prize::CopyPrizeConfigurationsRequest,
            storage::dto::prize::PrizeConfigurationResponse,
            storage::dto::scoring::SubmitScoreRequest,
            storage::dto::scoring::FinalizeScoresRequest,
            storage::dto::scoring::FinalizeScoresResponse,
            storage::dto::scoring::ScoringHistoryResponse,
            storage::models::EventWinner,
            storage::models::FieldChange,
            storage::models::ScoringHistoryEntry,
            storage::models::EventScoring,
            storage::models::JuryScore,
            storage::models::ScoringScope,
            storage::services::prize_allocation::ScoreRange,
            storage::services::result_projection::ResultRow,
            storage::services::result_projection::TierSummary,
            storage::services::result_projection::AchievedRange,
            storage::services::result_projection::ResultsProjection,
            storage::services::results::ResultsSnapshot,
        )
    ),
    tags(
        (name = "prizes", description = "Prize tier configuration"),
        (name = "scores", description = "Jury score entry, finalization and history"),
        (name = "results", description = "Ranked results with prize assignments"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting competition scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let board = ResultsBoard::new(config.change_feed_enabled);
    if config.change_feed_enabled {
        tokio::spawn(watch_scoring_changes(db.clone(), board.clone()));
    } else {
        tracing::info!("Results change feed disabled, results are recomputed on every request");
    }

    let state = AppState { db, board };

    let api = Router::new()
        .nest("/prizes", features::prizes::routes::routes())
        .nest("/scores", features::scoring::routes::routes())
        .nest("/results", features::results::routes::routes());

    let app = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
