//! Configuration management

pub mod app;

pub use app::{validate_config, AppConfig, ContentDefaults, ServiceSettings};
