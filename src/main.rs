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

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vsphere_ds_check::check;
use vsphere_ds_check::cli::Cli;
use vsphere_ds_check::common::config::AppConfig;
use vsphere_ds_check::config::Environment;
use vsphere_ds_check::datastore::create_snapshot_source;
use vsphere_ds_check::{Report, Status};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors must not look like CRITICAL to the supervisor.
            let code = if e.use_stderr() {
                Status::Unknown.exit_code()
            } else {
                0
            };
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    let source = create_snapshot_source(&cli.govc, cli.fetch_timeout());
    let result = check::run(&cli, &Environment::from_process(), source.as_ref());
    Report::from(result).print_and_exit();
}

/// Logs go to stderr; stdout carries only the plugin output line.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "vsphere_ds_check=debug"
    } else {
        AppConfig::DEFAULT_LOG_FILTER
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
