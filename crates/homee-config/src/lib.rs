//! YAML configuration loading for the homee integration
//!
//! Reads `configuration.yaml` from a configuration directory, resolving the
//! custom tags below, and extracts the `homee:` section:
//!
//! - `!include path` - Include another YAML file
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR [default]` - Environment variable substitution
//!
//! # Example
//!
//! ```ignore
//! use homee_config::HomeeConfig;
//!
//! let config = HomeeConfig::load("/config")?;
//! println!("connecting to {}", config.cube);
//! ```

mod error;
mod homee;
mod loader;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use homee::{HomeeConfig, CONFIG_FILE};
pub use loader::{load_yaml, YamlLoader};
pub use secrets::Secrets;

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
