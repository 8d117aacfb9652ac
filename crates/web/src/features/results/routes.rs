use axum::{Router, routing::get};

use super::handlers::{export_results, get_results};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_results))
        .route("/export", get(export_results))
}
