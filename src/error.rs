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

//! Error types for the datastore check.
//!
//! Every error is terminal for the invocation and is reported to the
//! monitoring supervisor as [`Status::Unknown`].
//!
//! # Example
//!
//! ```rust
//! use vsphere_ds_check::{ConfigError, Error, Status};
//!
//! let err: Error = ConfigError::Missing("host").into();
//! assert_eq!(err.status(), Status::Unknown);
//! assert_eq!(err.to_string(), "No vSphere host set - check config!");
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::status::Status;

/// Connection parameters could not be resolved.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No source supplied a required connection field.
    #[error("No vSphere {0} set - check config!")]
    Missing(&'static str),

    /// A textual boolean was outside the accepted vocabulary.
    #[error("Invalid boolean for {key}: {value:?} (expected true or false)")]
    InvalidBool { key: String, value: String },

    /// The config file exists but is not a usable YAML mapping.
    #[error("Invalid config file {}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: FileFormatError,
    },
}

/// Why the contents of a config file were rejected.
#[derive(Debug, Error)]
pub enum FileFormatError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping, found {0}")]
    NotMapping(&'static str),

    #[error("{key} must be a scalar, found {found}")]
    NotScalar { key: String, found: &'static str },
}

/// The datastore snapshot could not be obtained from govc.
#[derive(Debug, Error)]
pub enum FetchError {
    /// govc could not be started.
    #[error("Unable to run govc: {0}")]
    Io(#[from] std::io::Error),

    /// govc did not finish in time.
    #[error("govc timed out after {0:?}")]
    Timeout(Duration),

    /// govc exited unsuccessfully. `output` is its raw combined output.
    #[error("{output}")]
    CommandFailed { code: Option<i32>, output: String },

    /// govc succeeded but printed something that is not a datastore listing.
    #[error("Unable to parse govc output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The main error type for the check.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// Status to report for this error. Always UNKNOWN: the check could not
    /// decide anything about the datastore.
    pub fn status(&self) -> Status {
        Status::Unknown
    }
}

/// A specialized Result type for check operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Missing("username");
        assert_eq!(err.to_string(), "No vSphere username set - check config!");

        let err = ConfigError::InvalidBool {
            key: "GOVC_INSECURE".to_string(),
            value: "yes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid boolean for GOVC_INSECURE: \"yes\" (expected true or false)"
        );

        let err = FetchError::CommandFailed {
            code: Some(1),
            output: "govc: ServerFaultCode: Cannot complete login".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "govc: ServerFaultCode: Cannot complete login"
        );

        let err = FetchError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "govc timed out after 5s");
    }

    #[test]
    fn test_config_file_error_display() {
        let err = ConfigError::File {
            path: PathBuf::from("/etc/vsphere.yaml"),
            source: FileFormatError::NotMapping("a sequence"),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config file /etc/vsphere.yaml: expected a mapping, found a sequence"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "govc not found");
        let err: Error = FetchError::from(io_err).into();
        assert!(matches!(err, Error::Fetch(FetchError::Io(_))));
        assert_eq!(err.status(), Status::Unknown);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
