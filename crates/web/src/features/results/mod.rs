pub mod board;
pub mod export;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod watcher;
