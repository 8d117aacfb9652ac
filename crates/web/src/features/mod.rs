pub mod prizes;
pub mod results;
pub mod scoring;
