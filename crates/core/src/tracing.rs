//! Tracing setup for applications embedding the lending client

pub mod config;
pub mod init;

pub use config::LoggingConfig;
pub use init::init_tracing;
