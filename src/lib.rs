/// The current version of ClawPulse, sourced from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod agents;
pub mod commands;
pub mod config;
pub mod liveness;
pub mod remote;
pub mod types;
pub mod webui;
