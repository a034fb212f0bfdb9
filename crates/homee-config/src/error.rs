//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `!secret` key absent from secrets.yaml
    #[error("no secret named '{key}'")]
    MissingSecret { key: String },

    /// A file includes itself, directly or through other files
    #[error("{path} is included recursively")]
    IncludeCycle { path: PathBuf },

    /// `!env_var` without a default for an unset variable
    #[error("environment variable '{var}' is not set and has no default")]
    MissingEnvVar { var: String },

    #[error("configuration has no '{section}' section")]
    MissingSection { section: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
