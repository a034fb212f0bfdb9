//! Tag-resolving YAML loader
//!
//! - `!include path` - Include another YAML file, relative to the including one
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR [default]` - Environment variable substitution

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};
use tracing::{debug, trace};

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;

/// Tags resolved while loading; anything else is kept as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CustomTag {
    Include,
    Secret,
    EnvVar,
}

impl CustomTag {
    fn parse(tag: &Tag) -> Option<Self> {
        if tag == "include" {
            Some(CustomTag::Include)
        } else if tag == "secret" {
            Some(CustomTag::Secret)
        } else if tag == "env_var" {
            Some(CustomTag::EnvVar)
        } else {
            None
        }
    }

    fn name(self) -> &'static str {
        match self {
            CustomTag::Include => "!include",
            CustomTag::Secret => "!secret",
            CustomTag::EnvVar => "!env_var",
        }
    }
}

pub struct YamlLoader {
    config_dir: PathBuf,
    secrets: Secrets,
    /// Files being loaded right now; seeing one again is a cycle
    loading: HashSet<PathBuf>,
}

impl YamlLoader {
    /// Loader for `config_dir`, reading its secrets.yaml
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;
        Ok(Self::with_secrets(config_dir, secrets))
    }

    pub fn with_secrets(config_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            config_dir: config_dir.into(),
            secrets,
            loading: HashSet::new(),
        }
    }

    /// Read a file (relative paths resolve against the config directory)
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = match path.as_ref() {
            p if p.is_absolute() => p.to_path_buf(),
            p => self.config_dir.join(p),
        };
        if !self.loading.insert(path.clone()) {
            return Err(ConfigError::IncludeCycle { path });
        }

        debug!(path = %path.display(), "Loading YAML file");
        let result = fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })
            .and_then(|content| self.load_string(&content, &path));

        self.loading.remove(&path);
        result
    }

    /// Parse YAML text; `source_path` anchors relative includes
    pub fn load_string(&mut self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value = serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: source_path.to_path_buf(),
            source,
        })?;
        self.resolve(value, source_path)
    }

    fn resolve(&mut self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.resolve_tagged(*tagged, source_path),
            Value::Mapping(mapping) => mapping
                .into_iter()
                .map(|(k, v)| -> ConfigResult<(Value, Value)> {
                    Ok((self.resolve(k, source_path)?, self.resolve(v, source_path)?))
                })
                .collect::<ConfigResult<Mapping>>()
                .map(Value::Mapping),
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.resolve(item, source_path))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            scalar => Ok(scalar),
        }
    }

    fn resolve_tagged(&mut self, tagged: TaggedValue, source_path: &Path) -> ConfigResult<Value> {
        let Some(tag) = CustomTag::parse(&tagged.tag) else {
            let value = self.resolve(tagged.value, source_path)?;
            return Ok(Value::Tagged(Box::new(TaggedValue {
                tag: tagged.tag,
                value,
            })));
        };

        trace!(tag = tag.name(), "Resolving tag");
        let Value::String(argument) = tagged.value else {
            return Err(ConfigError::InvalidValue {
                key: tag.name().to_string(),
                reason: "argument must be a string".to_string(),
            });
        };

        match tag {
            CustomTag::Include => {
                let base = source_path.parent().unwrap_or(&self.config_dir);
                let target = base.join(&argument);
                debug!(path = %target.display(), "Including file");
                self.load_file(target)
            }
            CustomTag::Secret => {
                let secret = self.secrets.get(&argument)?;
                debug!(key = %argument, "Substituted secret");
                Ok(Value::String(secret.to_string()))
            }
            CustomTag::EnvVar => env_var(&argument).map(Value::String),
        }
    }
}

/// `NAME` or `NAME default`
fn env_var(argument: &str) -> ConfigResult<String> {
    let (var, default) = match argument.split_once(char::is_whitespace) {
        Some((var, default)) => (var, Some(default.trim())),
        None => (argument, None),
    };

    match (std::env::var(var), default) {
        (Ok(value), _) => {
            debug!(var, "Substituted env var");
            Ok(value)
        }
        (Err(_), Some(default)) => Ok(default.to_string()),
        (Err(_), None) => Err(ConfigError::MissingEnvVar {
            var: var.to_string(),
        }),
    }
}

/// Load a file from a config directory with every tag resolved
pub fn load_yaml(config_dir: impl AsRef<Path>, file: impl AsRef<Path>) -> ConfigResult<Value> {
    YamlLoader::new(config_dir.as_ref())?.load_file(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
        value.as_mapping()?.get(Value::String(key.to_string()))
    }

    #[test]
    fn test_secret() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "secrets.yaml", "cube_password: hunter2\n");
        write_file(dir.path(), "config.yaml", "password: !secret cube_password\n");

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        assert_eq!(get(&value, "password"), Some(&Value::String("hunter2".into())));
    }

    #[test]
    fn test_preloaded_secrets() {
        let dir = TempDir::new().unwrap();
        let mut secrets = Secrets::default();
        secrets.insert("cube_user", "admin");

        let mut loader = YamlLoader::with_secrets(dir.path(), secrets);
        let value = loader
            .load_string("username: !secret cube_user\n", &dir.path().join("inline.yaml"))
            .unwrap();
        assert_eq!(get(&value, "username"), Some(&Value::String("admin".into())));
    }

    #[test]
    fn test_missing_secret() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "config.yaml", "password: !secret nope\n");

        let result = load_yaml(dir.path(), "config.yaml");
        assert!(matches!(result, Err(ConfigError::MissingSecret { .. })));
    }

    #[test]
    fn test_env_var_with_default() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("HOMEE_CONFIG_TEST_CUBE", "10.0.0.5");
        write_file(
            dir.path(),
            "config.yaml",
            "cube: !env_var HOMEE_CONFIG_TEST_CUBE\nother: !env_var HOMEE_CONFIG_TEST_UNSET fallback\n",
        );

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        assert_eq!(get(&value, "cube"), Some(&Value::String("10.0.0.5".into())));
        assert_eq!(get(&value, "other"), Some(&Value::String("fallback".into())));

        std::env::remove_var("HOMEE_CONFIG_TEST_CUBE");
    }

    #[test]
    fn test_env_var_missing() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "config.yaml", "cube: !env_var HOMEE_CONFIG_TEST_MISSING\n");

        let result = load_yaml(dir.path(), "config.yaml");
        assert!(matches!(result, Err(ConfigError::MissingEnvVar { .. })));
    }

    #[test]
    fn test_include_and_circular_include() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "discovery.yaml", "light_profiles: [22]\n");
        write_file(dir.path(), "config.yaml", "discovery: !include discovery.yaml\n");

        let value = load_yaml(dir.path(), "config.yaml").unwrap();
        let discovery = get(&value, "discovery").unwrap();
        assert!(get(discovery, "light_profiles").unwrap().is_sequence());

        write_file(dir.path(), "a.yaml", "b: !include b.yaml\n");
        write_file(dir.path(), "b.yaml", "a: !include a.yaml\n");
        let result = load_yaml(dir.path(), "a.yaml");
        assert!(matches!(result, Err(ConfigError::IncludeCycle { .. })));
    }
}
