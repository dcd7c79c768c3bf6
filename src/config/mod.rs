//! Configuration loading and layering.
//!
//! Handles `.kibitz.toml` loading, environment variable resolution,
//! and default merging with proper priority ordering.

pub mod loader;

pub use loader::{ChatConfig, Config, ProviderConfig, ProxyConfig};
