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

//! Threshold evaluation of a single datastore.
//!
//! # Example
//!
//! ```rust
//! use vsphere_ds_check::datastore::{DatastoreInfo, VolumeSnapshot};
//! use vsphere_ds_check::{evaluate, Status};
//!
//! let snapshot: VolumeSnapshot = [DatastoreInfo::new("ds1", 20, 100)].into_iter().collect();
//! let result = evaluate(&snapshot, "ds1", 70.0, 90.0);
//! assert_eq!(result.status, Status::Warning);
//! assert_eq!(result.status_text, "WARNING: ds1");
//! assert_eq!(result.used_percent, Some(80.0));
//! ```

use tracing::{debug, warn};

use crate::datastore::{DatastoreInfo, VolumeSnapshot};
use crate::status::Status;

/// Outcome of checking one datastore.
///
/// `used_percent` is present exactly when the status is OK, WARNING or
/// CRITICAL.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub status: Status,
    pub status_text: String,
    pub used_percent: Option<f64>,
}

impl EvaluationResult {
    fn measured(status: Status, name: &str, used_percent: f64) -> Self {
        Self {
            status,
            status_text: format!("{status}: {name}"),
            used_percent: Some(used_percent),
        }
    }

    fn unknown(status_text: String) -> Self {
        Self {
            status: Status::Unknown,
            status_text,
            used_percent: None,
        }
    }
}

/// Compute used space for `volume_name` and classify it against the warning
/// and critical percentages. Both thresholds are inclusive and critical is
/// checked first.
///
/// If several datastores share the name, the first one listed is used.
pub fn evaluate(
    snapshot: &VolumeSnapshot,
    volume_name: &str,
    warn_percent: f64,
    crit_percent: f64,
) -> EvaluationResult {
    let mut matches = snapshot.iter().filter(|ds| ds.name == volume_name);

    let Some(datastore) = matches.next() else {
        debug!(
            "{volume_name} not among {} datastore(s)",
            snapshot.len()
        );
        return EvaluationResult::unknown(format!("Datastore {volume_name} Not Found"));
    };

    let duplicates = matches.count();
    if duplicates > 0 {
        warn!(
            "{} datastores are named {volume_name}; using the first one listed",
            duplicates + 1
        );
    }

    let Some(used) = used_percent(datastore) else {
        return EvaluationResult::unknown(format!(
            "Datastore {volume_name} Reports Zero Capacity"
        ));
    };

    let status = classify(used, warn_percent, crit_percent);
    debug!(
        "{volume_name}: {} of {} bytes free, {used:.1}% used -> {status}",
        datastore.free_space_bytes, datastore.capacity_bytes
    );
    EvaluationResult::measured(status, volume_name, used)
}

/// Percentage of capacity in use, rounded to one decimal place. `None` when
/// the datastore reports no capacity.
pub fn used_percent(datastore: &DatastoreInfo) -> Option<f64> {
    if datastore.capacity_bytes <= 0 {
        return None;
    }
    let free_ratio = datastore.free_space_bytes as f64 / datastore.capacity_bytes as f64;
    Some(round_tenths((1.0 - free_ratio) * 100.0))
}

/// Formatting rounds the exact binary value, with ties going to even.
fn round_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

fn classify(used: f64, warn_percent: f64, crit_percent: f64) -> Status {
    if used >= crit_percent {
        Status::Critical
    } else if used >= warn_percent {
        Status::Warning
    } else {
        Status::Ok
    }
}
