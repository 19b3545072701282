//! Infrastructure: configuration, the catalog port and tracing setup.

pub mod config;
pub mod ports;
pub mod telemetry;
