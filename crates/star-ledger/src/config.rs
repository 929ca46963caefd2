use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Star registry settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// A challenge older than this many seconds is expired.
    pub challenge_window_secs: u64,
    /// Marker text stored in the genesis record.
    pub genesis_data: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            challenge_window_secs: 300,
            genesis_data: "Genesis Block".into(),
        }
    }
}

impl RegistryConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> RegistryResult<Self> {
        toml::from_str(source).map_err(|e| RegistryError::Serialization(e.to_string()))
    }
}
