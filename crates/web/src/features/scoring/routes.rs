use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{finalize_scores, list_scoring_history, submit_score};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", put(submit_score))
        .route("/finalize", post(finalize_scores))
        .route("/history", get(list_scoring_history))
}
