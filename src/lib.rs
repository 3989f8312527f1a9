pub mod constants;
pub mod error;
pub mod logging;
pub mod types;

pub mod config;
pub mod elections;
pub mod registration;

// Use cases and the adapters they run on
pub mod app;
pub mod infra;
