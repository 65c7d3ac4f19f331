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

//! Nagios check for the percentage of used space on a vSphere datastore.
//!
//! The check resolves connection settings from flags, a YAML config file
//! and the environment, asks govc for the datastore listing, and classifies
//! one datastore against warning and critical thresholds.

pub mod check;
pub mod cli;
pub mod config;
pub mod datastore;
pub mod error;
pub mod evaluate;
pub mod report;
pub mod status;
pub mod utils;

pub mod common {
    pub mod config;
}

pub use error::{ConfigError, Error, FetchError, FileFormatError, Result};
pub use evaluate::{evaluate, EvaluationResult};
pub use report::Report;
pub use status::Status;
