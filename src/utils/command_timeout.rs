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

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{ChildStderr, ChildStdout, Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Execute a command with a timeout.
///
/// `envs` are added to the child's environment only; the current process
/// environment is left untouched.
///
/// Returns Ok(Output) if the command completes within the timeout, and an
/// `io::ErrorKind::TimedOut` error if it does not. A command that is still
/// running at the timeout is killed and reaped before returning.
pub fn run_command_with_timeout<K, V>(
    command: impl Into<PathBuf>,
    args: &[&str],
    envs: &[(K, V)],
    timeout: Duration,
) -> io::Result<Output>
where
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(command.into());
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn()?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain the pipes on a helper thread; this one keeps the child handle
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(read_pipes(stdout, stderr));
    });

    // Wait for the output with timeout
    match rx.recv_timeout(timeout) {
        Ok(pipes) => {
            let (stdout, stderr) = pipes?;
            let status = child.wait()?;
            Ok(Output {
                status,
                stdout,
                stderr,
            })
        }
        Err(_) => {
            // kill() fails only if the child already exited; wait() reaps it either way
            let _ = child.kill();
            let _ = child.wait();
            Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("Command timed out after {timeout:?}"),
            ))
        }
    }
}

/// Read both pipes to the end. stderr gets its own thread so a child that
/// fills one pipe while we block on the other cannot stall.
fn read_pipes(
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
) -> io::Result<(Vec<u8>, Vec<u8>)> {
    let stderr_reader = thread::spawn(move || -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    });

    let mut out = Vec::new();
    if let Some(mut pipe) = stdout {
        pipe.read_to_end(&mut out)?;
    }
    let err = stderr_reader
        .join()
        .map_err(|_| io::Error::other("stderr reader panicked"))??;
    Ok((out, err))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const NO_ENV: &[(&str, &str)] = &[];

    #[test]
    fn test_command_output() {
        let out = run_command_with_timeout("echo", &["hello"], NO_ENV, Duration::from_secs(5))
            .expect("echo should succeed");
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "hello\n");
    }

    #[test]
    fn test_env_reaches_child_only() {
        let out = run_command_with_timeout(
            "sh",
            &["-c", "printf %s \"$VSPHERE_DS_CHECK_TEST_VAR\""],
            &[("VSPHERE_DS_CHECK_TEST_VAR", "child-only")],
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "child-only");
        assert!(std::env::var("VSPHERE_DS_CHECK_TEST_VAR").is_err());
    }

    #[test]
    fn test_captures_stdout_stderr_and_status() {
        let out = run_command_with_timeout(
            "sh",
            &["-c", "echo out; echo err >&2; exit 3"],
            NO_ENV,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&out.stdout), "out\n");
        assert_eq!(String::from_utf8_lossy(&out.stderr), "err\n");
    }

    #[test]
    fn test_timed_out_command_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = format!("echo $$ > '{}'; exec sleep 30", pid_file.display());
        let err =
            run_command_with_timeout("sh", &["-c", &script], NO_ENV, Duration::from_millis(500))
                .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let liveness = format!("kill -0 {} 2>/dev/null", pid.trim());
        let alive = Command::new("sh").args(["-c", &liveness]).status().unwrap();
        assert!(!alive.success(), "process {} still running", pid.trim());
    }

    #[test]
    fn test_timeout() {
        let err = run_command_with_timeout("sleep", &["5"], NO_ENV, Duration::from_millis(100))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn test_missing_binary() {
        let err = run_command_with_timeout(
            "/nonexistent/vsphere-ds-check-govc",
            &[],
            NO_ENV,
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
