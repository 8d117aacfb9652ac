use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{
    copy_prize_configurations, create_prize_configuration, delete_prize_configuration,
    list_prize_configurations, update_prize_configuration,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prize_configurations).post(create_prize_configuration))
        .route("/copy", post(copy_prize_configurations))
        .route(
            "/:prize_id",
            put(update_prize_configuration).delete(delete_prize_configuration),
        )
}
