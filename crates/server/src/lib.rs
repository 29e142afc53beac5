pub mod api;
pub mod backends;
pub mod config;
pub mod error;
pub mod telemetry;
