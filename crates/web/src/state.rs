use axum::extract::FromRef;
use storage::Database;

use crate::features::results::board::ResultsBoard;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub board: ResultsBoard,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ResultsBoard {
    fn from_ref(state: &AppState) -> Self {
        state.board.clone()
    }
}
