//! Core roster library (configuration, fetch client, incremental loader).

pub mod client;
pub mod config;
pub mod loader;
