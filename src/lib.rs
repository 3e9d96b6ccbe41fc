pub mod api;
pub mod config;
pub mod etherscan;
pub mod job;
pub mod models;
pub mod normalize;
pub mod report;
