pub mod finalization;
pub mod prize_allocation;
pub mod prize_validation;
pub mod result_projection;
pub mod results;
pub mod score_aggregation;
