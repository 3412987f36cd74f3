//! Configuration schema for the API inspector.
//!
//! Defines the settings structure, defaults, and validation rules.

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the inspector: the wrapped client, the log store, and
/// the viewer.
///
/// Deserialized from user settings with camelCase keys; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectorConfig {
    /// Base origin of the API the client talks to.
    ///
    /// Calls whose resolved origin differs from this one are executed but
    /// not logged.
    pub base_origin: String,

    /// Maximum number of log entries retained by the store.
    pub capacity: usize,

    /// Ceiling on the serialized length of a persisted payload, in
    /// characters.
    pub max_data_length: usize,

    /// Request timeout in milliseconds for the wrapped HTTP client.
    pub timeout: u64,

    /// Viewer auto-refresh interval in milliseconds.
    pub refresh_interval: u64,

    /// How long the viewer's confirmation toast stays visible, in
    /// milliseconds.
    pub toast_duration: u64,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            base_origin: "http://localhost:2100".to_string(),
            capacity: crate::store::DEFAULT_CAPACITY,
            max_data_length: crate::sanitize::DEFAULT_MAX_DATA_LENGTH,
            timeout: 30000,
            refresh_interval: 1000,
            toast_duration: 3000,
        }
    }
}

impl InspectorConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are usable, or an error message naming the
    /// first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be greater than 0".to_string());
        }
        if self.max_data_length == 0 {
            return Err("maxDataLength must be greater than 0".to_string());
        }
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.refresh_interval == 0 {
            return Err("refreshInterval must be greater than 0".to_string());
        }

        let origin = Url::parse(&self.base_origin)
            .map_err(|e| format!("baseOrigin is not a valid URL: {}", e))?;
        if origin.host_str().is_none() {
            return Err("baseOrigin must include a host".to_string());
        }

        Ok(())
    }
}
