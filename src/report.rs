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

//! The single line of plugin output and its exit status.

use std::fmt;

use crate::common::config::AppConfig;
use crate::error::Error;
use crate::evaluate::EvaluationResult;
use crate::status::Status;

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    status: Status,
    line: String,
}

impl Report {
    pub fn from_evaluation(result: &EvaluationResult) -> Self {
        let prefix = AppConfig::OUTPUT_PREFIX;
        let line = match result.used_percent {
            Some(used) => format!("{prefix} {} Used: {used:.1}%", result.status_text),
            None => format!("{prefix} {}", result.status_text),
        };
        Self {
            status: result.status,
            line,
        }
    }

    /// Configuration problems are printed as the bare diagnostic. govc
    /// failures carry govc's own output after an UNKNOWN prefix.
    pub fn from_error(err: &Error) -> Self {
        let line = match err {
            Error::Config(e) => e.to_string(),
            Error::Fetch(e) => format!("{} {}: {e}", AppConfig::OUTPUT_PREFIX, Status::Unknown),
        };
        Self {
            status: err.status(),
            line,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Print the report to stdout and exit with its status.
    pub fn print_and_exit(self) -> ! {
        println!("{}", self.line);
        self.status.exit()
    }
}

impl From<Result<EvaluationResult, Error>> for Report {
    fn from(result: Result<EvaluationResult, Error>) -> Self {
        match result {
            Ok(evaluation) => Self::from_evaluation(&evaluation),
            Err(err) => Self::from_error(&err),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
