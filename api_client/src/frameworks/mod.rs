// Frameworks layer: configuration and process-level setup.

pub mod config;
pub mod telemetry;
