//! Configuration management for the API inspector.
//!
//! This module provides configuration loading, validation, and access
//! through a singleton pattern. Settings are read from a JSON document
//! under the "api-inspector" key and merged with defaults.

pub mod schema;

pub use schema::InspectorConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Global configuration instance.
///
/// Lazily initialized on first access; updated when settings change.
static CONFIG: Lazy<RwLock<InspectorConfig>> =
    Lazy::new(|| RwLock::new(InspectorConfig::default()));

/// Loads configuration from a JSON settings document.
///
/// Reads the "api-inspector" settings, merges them with defaults,
/// validates the result, and updates the global configuration.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under
///   the "api-inspector" key
///
/// # Returns
///
/// `Ok(InspectorConfig)` with the loaded configuration, or `Err` if
/// validation fails.
///
/// # Example
///
/// ```
/// use api_inspector::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "api-inspector": {
///         "baseOrigin": "http://localhost:4000",
///         "capacity": 50
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.capacity, 50);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<InspectorConfig, String> {
    let mut config = InspectorConfig::default();

    if let Some(settings) = settings_json {
        if let Some(inspector_settings) = settings.get("api-inspector") {
            match serde_json::from_value::<InspectorConfig>(inspector_settings.clone()) {
                Ok(user_config) => {
                    config = user_config;
                }
                Err(e) => {
                    log::warn!(
                        "failed to parse api-inspector settings: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}. Using defaults.", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the current configuration; defaults if nothing has
/// been loaded yet.
pub fn get_config() -> InspectorConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| InspectorConfig::default())
}

/// Updates specific configuration settings in place.
///
/// # Arguments
///
/// * `updater` - A closure that modifies the configuration
///
/// # Example
///
/// ```
/// use api_inspector::config::{get_config, reset_config, update_config};
///
/// update_config(|config| {
///     config.capacity = 200;
/// });
/// assert_eq!(get_config().capacity, 200);
/// # reset_config();
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut InspectorConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("configuration invalid after update: {}. Reverting.", e);
            *config = InspectorConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = InspectorConfig::default();
    }
}
