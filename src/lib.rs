pub mod api;
pub mod config;
pub mod power_quality;
pub mod telemetry;
