//! Shared configuration library for Feedex.
//!
//! This crate centralizes feed profile definitions (endpoint, items key,
//! trigger thresholds, debounce window, cursor policy), TOML loading with
//! `FEEDEX_*` environment overrides, the built-in profiles for the four
//! known aggregator backends, and tracing bootstrap, so there is a single
//! source of truth for defaults and validation rules.

pub mod loader;
pub mod profile;
pub mod telemetry;

pub use loader::{ConfigSource, FeedexConfig};
pub use profile::FeedProfile;
pub use telemetry::init_tracing;
