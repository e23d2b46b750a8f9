//! # Runtime Configuration Module
//!
//! Server settings resolved at startup from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. environment variables
//!
//! ## Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `BRRTLITE_ADDR` | listen address | `127.0.0.1:8080` |
//! | `BRRTLITE_MAX_REQUEST_SIZE` | read buffer per connection, bytes | `1048576` |
//! | `BRRTLITE_STACK_SIZE` | coroutine stack size, bytes | `0x10000` |
//! | `BRRTLITE_STATIC_DIR` | directory served under `/static` | `static` |
//! | `BRRTLITE_TEMPLATE_DIR` | directory holding `<name>.html` templates | `views` |
//!
//! Sizes accept decimal (`65536`) or hexadecimal (`0x10000`).
//!
//! ## YAML
//!
//! ```yaml
//! addr: 0.0.0.0:3000
//! max_request_size: 0x20000
//! stack_size: 32768
//! static_dir: public
//! static_prefix: /assets
//! template_dir: templates
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use brrtlite::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::default();
//! assert_eq!(config.max_request_size, 1024 * 1024);
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::server::{DEFAULT_MAX_REQUEST_SIZE, DEFAULT_STACK_SIZE};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_STATIC_PREFIX: &str = "/static";
pub const DEFAULT_TEMPLATE_DIR: &str = "views";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Yaml { path: PathBuf, source: serde_yaml::Error },
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Yaml { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Yaml { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub addr: String,
    #[serde(deserialize_with = "deserialize_size")]
    pub max_request_size: usize,
    /// Stack size for connection coroutines in bytes
    #[serde(deserialize_with = "deserialize_size")]
    pub stack_size: usize,
    pub static_dir: PathBuf,
    pub static_prefix: String,
    pub template_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            stack_size: DEFAULT_STACK_SIZE,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
        }
    }
}

impl RuntimeConfig {
    /// Defaults, then the YAML file at `path` when given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| env::var(key).ok())
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    fn with_env_overrides<F>(mut self, get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = get("BRRTLITE_ADDR") {
            self.addr = addr;
        }
        if let Some(value) = get("BRRTLITE_MAX_REQUEST_SIZE") {
            self.max_request_size = env_size("BRRTLITE_MAX_REQUEST_SIZE", &value)?;
        }
        if let Some(value) = get("BRRTLITE_STACK_SIZE") {
            self.stack_size = env_size("BRRTLITE_STACK_SIZE", &value)?;
        }
        if let Some(dir) = get("BRRTLITE_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("BRRTLITE_TEMPLATE_DIR") {
            self.template_dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}

/// Parse a byte size written in decimal or `0x` hexadecimal. Zero is rejected.
pub fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    };
    parsed.filter(|n| *n > 0)
}

fn env_size(key: &str, value: &str) -> Result<usize, ConfigError> {
    parse_size(value).ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn deserialize_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Number(usize),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Number(n) if n > 0 => Ok(n),
        Size::Number(n) => Err(serde::de::Error::custom(format!("invalid size {n}"))),
        Size::Text(s) => {
            parse_size(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid size {s:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("16384"), Some(16384));
        assert_eq!(parse_size("0x4000"), Some(0x4000));
        assert_eq!(parse_size(" 0X10 "), Some(16));
        assert_eq!(parse_size("0"), None);
        assert_eq!(parse_size("big"), None);
        assert_eq!(parse_size("0xzz"), None);
    }

    #[test]
    fn test_env_overrides() {
        let config = RuntimeConfig::default()
            .with_env_overrides(vars(&[
                ("BRRTLITE_ADDR", "0.0.0.0:9000"),
                ("BRRTLITE_MAX_REQUEST_SIZE", "4096"),
                ("BRRTLITE_STACK_SIZE", "0x8000"),
                ("BRRTLITE_STATIC_DIR", "public"),
                ("BRRTLITE_TEMPLATE_DIR", "tpl"),
            ]))
            .unwrap();
        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.max_request_size, 4096);
        assert_eq!(config.stack_size, 0x8000);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.template_dir, PathBuf::from("tpl"));
        assert_eq!(config.static_prefix, "/static");
    }

    #[test]
    fn test_invalid_env_value_is_an_error() {
        let err = RuntimeConfig::default()
            .with_env_overrides(vars(&[("BRRTLITE_STACK_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BRRTLITE_STACK_SIZE"));
        assert_eq!(err.to_string(), "invalid value for BRRTLITE_STACK_SIZE: \"lots\"");
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config = RuntimeConfig::from_yaml_str("addr: 0.0.0.0:3000\nstack_size: 0x8000\n").unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.stack_size, 0x8000);
        assert_eq!(config.max_request_size, DEFAULT_MAX_REQUEST_SIZE);
        assert_eq!(config.template_dir, PathBuf::from("views"));
    }

    #[test]
    fn test_yaml_numeric_size() {
        let config = RuntimeConfig::from_yaml_str("max_request_size: 2048").unwrap();
        assert_eq!(config.max_request_size, 2048);
    }

    #[test]
    fn test_yaml_rejects_unknown_keys() {
        assert!(RuntimeConfig::from_yaml_str("adr: typo").is_err());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RuntimeConfig::from_yaml_str("").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn test_yaml_file_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "stack_size: [1, 2]").unwrap();
        let err = RuntimeConfig::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.to_string().contains("config.yaml"));

        let missing = dir.path().join("missing.yaml");
        let err = RuntimeConfig::from_yaml_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
