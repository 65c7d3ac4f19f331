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

//! One run of the check: resolve settings, fetch, evaluate.

use tracing::debug;

use crate::cli::Cli;
use crate::config::{resolve, Environment, FileConfig};
use crate::datastore::SnapshotSource;
use crate::error::Result;
use crate::evaluate::{evaluate, EvaluationResult};

/// Run the check described by `args`.
///
/// Connection settings that are missing or malformed stop the run before
/// `source` is asked for anything.
pub fn run(
    args: &Cli,
    env: &Environment,
    source: &dyn SnapshotSource,
) -> Result<EvaluationResult> {
    let file = match &args.file {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let conn = resolve(&args.connection_flags(), &file, env)?;
    debug!("Resolved connection: {conn:?}");

    let snapshot = source.fetch(&conn)?;

    Ok(evaluate(
        &snapshot,
        &args.datastore,
        f64::from(args.warn),
        f64::from(args.crit),
    ))
}
