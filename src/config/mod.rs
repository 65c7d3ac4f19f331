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

//! Connection settings resolution.
//!
//! Each connection field is taken from the first layer that sets it, in the
//! order: command-line flag, config file, environment. Empty values count as
//! unset. Resolution is a pure function of its inputs; nothing here reads or
//! writes the process environment.
//!
//! # Example
//!
//! ```rust
//! use vsphere_ds_check::config::{resolve, ConnectionFlags, Environment, FileConfig};
//!
//! let flags = ConnectionFlags {
//!     host: Some("vcenter.example.com".to_string()),
//!     ..Default::default()
//! };
//! let env: Environment = [
//!     ("GOVC_URL", "ignored.example.com"),
//!     ("GOVC_USERNAME", "monitor"),
//!     ("GOVC_PASSWORD", "secret"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let conn = resolve(&flags, &FileConfig::default(), &env).unwrap();
//! assert_eq!(conn.host, "vcenter.example.com");
//! assert_eq!(conn.username, "monitor");
//! assert!(!conn.insecure);
//! ```

pub mod env;
pub mod file;

use std::fmt;

use tracing::debug;

use crate::common::config::EnvKeys;
use crate::error::ConfigError;

pub use env::{parse_bool, Environment};
pub use file::FileConfig;

/// A layer of key/value settings keyed by the `GOVC_*` names.
pub trait SettingSource {
    /// Short name of the layer, for logging.
    fn name(&self) -> &'static str;

    /// The raw value for `key`, if this layer has one.
    fn get(&self, key: &str) -> Option<&str>;
}

/// Connection settings given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionFlags {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// `-k` can only turn insecure mode on.
    pub insecure: bool,
}

/// Resolved parameters for talking to vSphere.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub insecure: bool,
}

impl ConnectionConfig {
    /// The variables govc reads its connection settings from. These are
    /// handed to the govc child process only.
    pub fn govc_env(&self) -> [(&'static str, String); 4] {
        [
            (EnvKeys::URL, self.host.clone()),
            (EnvKeys::USERNAME, self.username.clone()),
            (EnvKeys::PASSWORD, self.password.clone()),
            (EnvKeys::INSECURE, self.insecure.to_string()),
        ]
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// Merge flags, config file and environment into a [`ConnectionConfig`].
///
/// Fails with [`ConfigError::Missing`] if host, username or password is not
/// set by any layer, and with [`ConfigError::InvalidBool`] if the layer that
/// decides `GOVC_INSECURE` holds text outside the boolean vocabulary.
pub fn resolve(
    flags: &ConnectionFlags,
    file: &FileConfig,
    env: &Environment,
) -> Result<ConnectionConfig, ConfigError> {
    let layers: [&dyn SettingSource; 2] = [file, env];

    let host = lookup(flags.host.as_deref(), EnvKeys::URL, &layers)
        .ok_or(ConfigError::Missing("host"))?;
    let username = lookup(flags.username.as_deref(), EnvKeys::USERNAME, &layers)
        .ok_or(ConfigError::Missing("username"))?;
    let password = lookup(flags.password.as_deref(), EnvKeys::PASSWORD, &layers)
        .ok_or(ConfigError::Missing("password"))?;

    let insecure = if flags.insecure {
        true
    } else {
        match lookup(None, EnvKeys::INSECURE, &layers) {
            Some(text) => parse_bool(EnvKeys::INSECURE, text)?,
            None => false,
        }
    };

    Ok(ConnectionConfig {
        host: host.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        insecure,
    })
}

fn lookup<'a>(
    flag: Option<&'a str>,
    key: &str,
    layers: &[&'a dyn SettingSource],
) -> Option<&'a str> {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        debug!("{key} taken from command line");
        return Some(value);
    }
    layers.iter().copied().find_map(|layer| {
        let value = layer.get(key).filter(|v| !v.is_empty())?;
        debug!("{key} taken from {}", layer.name());
        Some(value)
    })
}
