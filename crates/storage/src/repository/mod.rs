pub mod prize_configuration;
pub mod registration;
pub mod scope;
pub mod scoring;
pub mod scoring_history;
pub mod winner;
