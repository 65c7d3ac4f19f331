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

//! Snapshot source trait and the govc implementation.
//!
//! This module provides the [`SnapshotSource`] trait for obtaining a
//! [`VolumeSnapshot`] and a [`GovcReader`] implementation that shells out to
//! `govc datastore.info -json`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::common::config::AppConfig;
use crate::config::ConnectionConfig;
use crate::datastore::info::VolumeSnapshot;
use crate::error::FetchError;
use crate::utils::run_command_with_timeout;

/// Trait for reading the datastore listing from vSphere.
///
/// # Example
///
/// ```rust,no_run
/// use vsphere_ds_check::config::ConnectionConfig;
/// use vsphere_ds_check::datastore::SnapshotSource;
///
/// fn print_datastores(source: &dyn SnapshotSource, conn: &ConnectionConfig) {
///     if let Ok(snapshot) = source.fetch(conn) {
///         for ds in &snapshot {
///             println!("{}: {} of {} bytes free", ds.name, ds.free_space_bytes, ds.capacity_bytes);
///         }
///     }
/// }
/// ```
pub trait SnapshotSource {
    /// Fetch every datastore visible with the given connection settings.
    fn fetch(&self, conn: &ConnectionConfig) -> Result<VolumeSnapshot, FetchError>;
}

/// Reads datastores by running `govc datastore.info -json`.
///
/// Connection settings are passed to govc through its own environment
/// (`GOVC_URL` and friends), set on the child process only.
#[derive(Debug, Clone)]
pub struct GovcReader {
    binary: PathBuf,
    timeout: Duration,
}

impl GovcReader {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl Default for GovcReader {
    fn default() -> Self {
        Self::new(
            AppConfig::DEFAULT_GOVC_BINARY,
            Duration::from_secs(AppConfig::DEFAULT_FETCH_TIMEOUT_SECS),
        )
    }
}

impl SnapshotSource for GovcReader {
    fn fetch(&self, conn: &ConnectionConfig) -> Result<VolumeSnapshot, FetchError> {
        debug!(
            "Running {} {} against {}",
            self.binary.display(),
            AppConfig::GOVC_DATASTORE_ARGS.join(" "),
            conn.host
        );

        let output = run_command_with_timeout(
            &self.binary,
            &AppConfig::GOVC_DATASTORE_ARGS,
            &conn.govc_env(),
            self.timeout,
        )
        .map_err(|e| match e.kind() {
            io::ErrorKind::TimedOut => FetchError::Timeout(self.timeout),
            _ => FetchError::Io(e),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let combined = format!("{stdout}{stderr}");
            let code = output.status.code();
            let output = match combined.trim_end() {
                "" => format!("govc exited with status {code:?}"),
                raw => raw.to_string(),
            };
            return Err(FetchError::CommandFailed { code, output });
        }

        let snapshot = VolumeSnapshot::from_govc_json(&stdout)?;
        debug!("govc reported {} datastore(s)", snapshot.len());
        Ok(snapshot)
    }
}

/// Create the default govc-backed snapshot source.
pub fn create_snapshot_source(
    binary: impl Into<PathBuf>,
    timeout: Duration,
) -> Box<dyn SnapshotSource> {
    Box::new(GovcReader::new(binary, timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> ConnectionConfig {
        ConnectionConfig {
            host: "vc.example.com".to_string(),
            username: "monitor".to_string(),
            password: "secret".to_string(),
            insecure: false,
        }
    }

    #[test]
    fn test_default_reader() {
        let reader = GovcReader::default();
        assert_eq!(reader.binary, PathBuf::from("govc"));
        assert_eq!(reader.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let reader = GovcReader::new("/nonexistent/govc", Duration::from_secs(5));
        let err = reader.fetch(&conn()).unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }

    #[test]
    fn test_create_snapshot_source() {
        let source = create_snapshot_source("/nonexistent/govc", Duration::from_secs(5));
        assert!(source.fetch(&conn()).is_err());
    }
}
