pub mod app;
pub mod chart;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod infra;
pub mod logging;
pub mod normalize;
pub mod store;
pub mod types;
