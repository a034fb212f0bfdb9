//! `secrets.yaml` next to the configuration file, so the cube credentials
//! never have to live in configuration.yaml

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

pub const SECRETS_FILE: &str = "secrets.yaml";

/// Scalars accepted as secret values. Numeric passwords stay strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum SecretValue {
    Text(String),
    Number(serde_yaml::Number),
    Flag(bool),
}

impl From<SecretValue> for String {
    fn from(value: SecretValue) -> Self {
        match value {
            SecretValue::Text(text) => text,
            SecretValue::Number(number) => number.to_string(),
            SecretValue::Flag(flag) => flag.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Secrets {
    values: HashMap<String, String>,
}

impl Secrets {
    /// Read `<config_dir>/secrets.yaml`. A missing file yields no secrets.
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join(SECRETS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "No secrets file");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed: HashMap<String, Option<SecretValue>> = serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Yaml {
                path: path.clone(),
                source,
            })?;

        let values: HashMap<String, String> = parsed
            .into_iter()
            .map(|(key, value)| (key, value.map(String::from).unwrap_or_default()))
            .collect();
        debug!(count = values.len(), "Loaded secrets");

        Ok(Self { values })
    }

    /// Add or replace a secret
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingSecret {
                key: key.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
