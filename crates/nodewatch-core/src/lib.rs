//! Shared configuration and shutdown signalling for nodewatch.

pub mod config;
pub mod shutdown;

pub use config::Settings;
pub use shutdown::ShutdownFlag;
