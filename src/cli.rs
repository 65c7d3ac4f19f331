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

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::common::config::AppConfig;
use crate::config::ConnectionFlags;

/// Nagios check for the percentage used of a vSphere datastore.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The vSphere host | GOVC_URL (string)
    #[arg(short = 'H', long)]
    pub host: Option<String>,
    /// The user to connect as | GOVC_USERNAME (string)
    #[arg(short, long)]
    pub username: Option<String>,
    /// The user's password | GOVC_PASSWORD (string)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Don't verify SSL certificates for the vSphere host | GOVC_INSECURE (boolean)
    #[arg(short = 'k', long)]
    pub insecure: bool,
    /// A yaml-formatted config file.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// The percentage at which a datastore will be in a WARNING state.
    #[arg(short, long, visible_alias = "warning", value_name = "PERCENT",
          default_value_t = AppConfig::DEFAULT_WARN_PERCENT)]
    pub warn: u32,
    /// The percentage at which a datastore will be in a CRITICAL state.
    #[arg(short, long, visible_alias = "critical", value_name = "PERCENT",
          default_value_t = AppConfig::DEFAULT_CRIT_PERCENT)]
    pub crit: u32,
    /// The govc binary used to query vSphere.
    #[arg(long, value_name = "PATH", default_value = AppConfig::DEFAULT_GOVC_BINARY)]
    pub govc: PathBuf,
    /// Seconds to wait for govc before giving up.
    #[arg(long, value_name = "SECONDS", default_value_t = AppConfig::DEFAULT_FETCH_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
    /// Log debug information to stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// The name of the datastore to check.
    #[arg(value_name = "DATASTORE")]
    pub datastore: String,
}

impl Cli {
    pub fn connection_flags(&self) -> ConnectionFlags {
        ConnectionFlags {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure: self.insecure,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["vsphere-ds-check", "ds1"]).unwrap();
        assert_eq!(cli.datastore, "ds1");
        assert_eq!(cli.warn, 80);
        assert_eq!(cli.crit, 90);
        assert_eq!(cli.govc, PathBuf::from("govc"));
        assert_eq!(cli.fetch_timeout(), Duration::from_secs(30));
        assert!(!cli.insecure);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "vsphere-ds-check",
            "-H",
            "vc.example.com",
            "-u",
            "monitor",
            "-p",
            "secret",
            "-k",
            "-f",
            "/etc/nagios/vsphere.yaml",
            "-w",
            "70",
            "-c",
            "85",
            "datastore1",
        ])
        .unwrap();
        let flags = cli.connection_flags();
        assert_eq!(flags.host.as_deref(), Some("vc.example.com"));
        assert_eq!(flags.username.as_deref(), Some("monitor"));
        assert_eq!(flags.password.as_deref(), Some("secret"));
        assert!(flags.insecure);
        assert_eq!(cli.file, Some(PathBuf::from("/etc/nagios/vsphere.yaml")));
        assert_eq!(cli.warn, 70);
        assert_eq!(cli.crit, 85);
        assert_eq!(cli.datastore, "datastore1");
    }

    #[test]
    fn test_long_aliases() {
        let cli = Cli::try_parse_from([
            "vsphere-ds-check",
            "--warning",
            "60",
            "--critical",
            "75",
            "ds1",
        ])
        .unwrap();
        assert_eq!(cli.warn, 60);
        assert_eq!(cli.crit, 75);
    }

    #[test]
    fn test_datastore_is_required() {
        assert!(Cli::try_parse_from(["vsphere-ds-check", "-w", "70"]).is_err());
    }

    #[test]
    fn test_thresholds_must_be_integers() {
        assert!(Cli::try_parse_from(["vsphere-ds-check", "-w", "70.5", "ds1"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["vsphere-ds-check", "--timeout", "0", "ds1"]).is_err());
    }
}
