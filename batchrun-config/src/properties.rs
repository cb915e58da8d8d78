//! Algorithm properties files
//!
//! A file-configured experiment keeps one `<algorithm>.conf` file per
//! algorithm. Each file is a flat list of `key=value` lines that tune the
//! algorithm's parameters. The reserved `algorithm` key selects which
//! algorithm variant is actually constructed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// File extension of algorithm properties files
pub const PROPERTIES_EXTENSION: &str = "conf";

/// Key that overrides the algorithm variant to construct
pub const ALGORITHM_KEY: &str = "algorithm";

/// Ordered key/value parameters for a single algorithm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgorithmProperties {
    entries: BTreeMap<String, String>,
}

impl AlgorithmProperties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties from in-memory text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Self::parse_with_origin(content, Path::new("<memory>"))
    }

    /// Read and parse a properties file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::PropertiesNotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::FileReadError(e),
        })?;
        Self::parse_with_origin(&content, path)
    }

    fn parse_with_origin(content: &str, origin: &Path) -> ConfigResult<Self> {
        let mut properties = Self::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let malformed = || ConfigError::MalformedProperties {
                path: origin.to_path_buf(),
                line: index + 1,
                content: line.to_string(),
            };

            let separator = line.find(['=', ':']).ok_or_else(malformed)?;
            let key = line[..separator].trim();
            if key.is_empty() {
                return Err(malformed());
            }
            let value = line[separator + 1..].trim();

            // Later definitions win
            properties.insert(key, value);
        }

        Ok(properties)
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a raw value, falling back to `default` when absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parse a value into `T`; `Ok(None)` when the key is absent
    pub fn parse_value<T>(&self, key: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
                ConfigError::ValidationError(format!("Invalid value '{}' for {}: {}", raw, key, e))
            }),
        }
    }

    /// Algorithm variant named by the `algorithm` key, or `default`
    pub fn algorithm_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.get_or(ALGORITHM_KEY, default)
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for AlgorithmProperties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

/// Path of the properties file for `algorithm` inside `directory`
pub fn properties_path(directory: impl AsRef<Path>, algorithm: &str) -> PathBuf {
    directory
        .as_ref()
        .join(format!("{}.{}", algorithm, PROPERTIES_EXTENSION))
}

/// Load `<directory>/<algorithm>.conf`
pub fn load_algorithm_properties(
    directory: impl AsRef<Path>,
    algorithm: &str,
) -> ConfigResult<AlgorithmProperties> {
    AlgorithmProperties::from_file(properties_path(directory, algorithm))
}
