//! Main application configuration
//!
//! This module defines the configuration structures for the score-room
//! rating service, including environment variable loading and validation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub content_defaults: ContentDefaults,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Maximum entries returned by history/leaderboard listings
    pub max_listing_entries: usize,
}

/// Default tuning parameters for newly created contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDefaults {
    /// Seed rating for unseen players
    pub default_rating: f64,
    /// K-factor scaling delta magnitude
    pub slope: f64,
    /// Softmax divisor; larger values flatten expected-share differences
    pub temperature: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceSettings::default(),
            content_defaults: ContentDefaults::default(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "score-room".to_string(),
            log_level: "info".to_string(),
            max_listing_entries: 50,
        }
    }
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            slope: 32.0,
            temperature: 400.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(max_entries) = env::var("MAX_LISTING_ENTRIES") {
            config.service.max_listing_entries = max_entries
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_LISTING_ENTRIES value: {}", max_entries))?;
        }

        if let Ok(rating) = env::var("DEFAULT_RATING") {
            config.content_defaults.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(slope) = env::var("RATING_SLOPE") {
            config.content_defaults.slope = slope
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_SLOPE value: {}", slope))?;
        }
        if let Ok(temperature) = env::var("RATING_TEMPERATURE") {
            config.content_defaults.temperature = temperature
                .parse()
                .map_err(|_| anyhow!("Invalid RATING_TEMPERATURE value: {}", temperature))?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.max_listing_entries == 0 {
        return Err(anyhow!("Max listing entries must be greater than 0"));
    }

    if !config.content_defaults.default_rating.is_finite() {
        return Err(anyhow!(
            "Default rating must be finite: {}",
            config.content_defaults.default_rating
        ));
    }
    if !config.content_defaults.slope.is_finite() || config.content_defaults.slope <= 0.0 {
        return Err(anyhow!(
            "Rating slope must be positive: {}",
            config.content_defaults.slope
        ));
    }
    if !config.content_defaults.temperature.is_finite() || config.content_defaults.temperature <= 0.0
    {
        return Err(anyhow!(
            "Rating temperature must be positive: {}",
            config.content_defaults.temperature
        ));
    }

    Ok(())
}
