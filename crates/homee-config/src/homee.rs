//! The `homee:` section of configuration.yaml

use homee_core::DiscoveryRules;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// Main configuration file name inside the config directory
pub const CONFIG_FILE: &str = "configuration.yaml";

const SECTION: &str = "homee";

/// Connection settings for one cube plus the discovery rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeeConfig {
    /// Host name or IP address of the cube
    pub cube: String,

    pub username: String,

    pub password: String,

    /// Profile sets and cover-position type used to classify nodes
    #[serde(default)]
    pub discovery: DiscoveryRules,
}

impl HomeeConfig {
    /// Load the `homee:` section from `<config_dir>/configuration.yaml`
    pub fn load(config_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = load_yaml(config_dir.as_ref(), CONFIG_FILE)?;
        Self::from_yaml(&yaml)
    }

    /// Parse the `homee:` section from an already loaded YAML document
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let mapping = yaml.as_mapping().ok_or_else(|| ConfigError::InvalidValue {
            key: "root".to_string(),
            reason: "configuration must be a mapping".to_string(),
        })?;

        let section = mapping
            .get(Value::String(SECTION.to_string()))
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection {
                section: SECTION.to_string(),
            })?;

        let config: HomeeConfig =
            serde_yaml::from_value(section).map_err(|e| ConfigError::InvalidValue {
                key: SECTION.to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        debug!(cube = %config.cube, "Loaded homee configuration");

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [
            ("cube", &self.cube),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: format!("{}.{}", SECTION, key),
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
