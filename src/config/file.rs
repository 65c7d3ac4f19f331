// Copyright 2026 The vsphere-ds-check Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! YAML config file.
//!
//! The file is a flat mapping using the same keys as the environment:
//!
//! ```yaml
//! GOVC_URL: vcenter.example.com
//! GOVC_USERNAME: monitor@vsphere.local
//! GOVC_PASSWORD: secret
//! GOVC_INSECURE: true
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, warn};

use crate::common::config::EnvKeys;
use crate::config::SettingSource;
use crate::error::{ConfigError, FileFormatError};

/// Connection settings read from a config file.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    values: HashMap<String, String>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// A file that cannot be read is treated as empty, so a missing file
    /// does not stop the environment from supplying the settings. A file
    /// that reads but is not a YAML mapping of scalars is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring unreadable config file {}: {e}", path.display());
                return Ok(Self::default());
            }
        };

        Self::parse(&content).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the YAML text of a config file.
    pub fn parse(content: &str) -> Result<Self, FileFormatError> {
        let blank = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }

        let document: Value = serde_yaml::from_str(content)?;

        let mapping = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            other => return Err(FileFormatError::NotMapping(type_name(&other))),
        };

        let mut values = HashMap::new();
        for (key, value) in mapping {
            let Value::String(key) = key else {
                continue;
            };
            if !EnvKeys::ALL.contains(&key.as_str()) {
                debug!("Ignoring unknown config key {key}");
                continue;
            }
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(FileFormatError::NotScalar {
                        found: type_name(&other),
                        key,
                    })
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SettingSource for FileConfig {
    fn name(&self) -> &'static str {
        "config file"
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::parse(
            "GOVC_URL: vc.example.com\n\
             GOVC_USERNAME: monitor\n\
             GOVC_PASSWORD: secret\n\
             GOVC_INSECURE: true\n",
        )
        .unwrap();
        assert_eq!(config.get("GOVC_URL"), Some("vc.example.com"));
        assert_eq!(config.get("GOVC_USERNAME"), Some("monitor"));
        assert_eq!(config.get("GOVC_PASSWORD"), Some("secret"));
        assert_eq!(config.get("GOVC_INSECURE"), Some("true"));
    }

    #[test]
    fn test_numbers_are_kept_as_text() {
        let config = FileConfig::parse("GOVC_PASSWORD: 12345\n").unwrap();
        assert_eq!(config.get("GOVC_PASSWORD"), Some("12345"));
    }

    #[test]
    fn test_quoted_booleans_stay_strings() {
        let config = FileConfig::parse("GOVC_INSECURE: \"False\"\n").unwrap();
        assert_eq!(config.get("GOVC_INSECURE"), Some("False"));
    }

    #[test]
    fn test_unknown_keys_and_nulls_are_skipped() {
        let config = FileConfig::parse("GOVC_DATACENTER: dc1\nGOVC_URL:\n").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(FileConfig::parse("").unwrap().is_empty());
        assert!(FileConfig::parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_mapping() {
        let err = FileConfig::parse("- GOVC_URL\n- GOVC_USERNAME\n").unwrap_err();
        assert!(matches!(err, FileFormatError::NotMapping("a sequence")));
        assert_eq!(err.to_string(), "expected a mapping, found a sequence");
    }

    #[test]
    fn test_rejects_nested_values() {
        let err = FileConfig::parse("GOVC_URL:\n  host: vc\n").unwrap_err();
        assert!(matches!(err, FileFormatError::NotScalar { .. }));
        assert_eq!(err.to_string(), "GOVC_URL must be a scalar, found a mapping");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GOVC_URL: vc.example.com").unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.get("GOVC_URL"), Some("vc.example.com"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load(&dir.path().join("absent.yaml")).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_invalid_yaml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "GOVC_URL: [unterminated").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::File {
                source: FileFormatError::Yaml(_),
                ..
            }
        ));
    }
}
