//! Configuration management for the gallery
//!
//! Settings live in a TOML file under the platform config directory;
//! command-line flags override them for a single session.

pub mod settings;

pub use settings::{Settings, SettingsOverrides, parse_level};
