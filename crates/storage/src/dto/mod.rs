pub mod prize;
pub mod scoring;
