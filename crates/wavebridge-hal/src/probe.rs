//! Subprocess-invocation obstacle source.
//!
//! Runs an external ranging program once per fetch and parses the
//! `KEY:V|KEY:V|...` line it prints on stdout. The program is expected to
//! sample its sensor and exit immediately; a run that overstays the
//! configured timeout is killed.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use wavebridge_perception::ranging::parse_status_line;
use wavebridge_types::{BridgeError, ObstacleSnapshot};

use crate::obstacle::ObstacleSource;

/// Default bound on one probe run.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Invokes a one-shot ranging program and interprets its stdout.
///
/// Spawn failures, non-zero exits and timeouts are all reported as errors;
/// the consumer decides how to degrade.
pub struct ProbeObstacleSource {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProbeObstacleSource {
    /// Create a source running `program` with no arguments and the
    /// [default timeout][DEFAULT_PROBE_TIMEOUT].
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Append one argument to the probe invocation.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replace the per-run timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ObstacleSource for ProbeObstacleSource {
    fn id(&self) -> &str {
        "probe"
    }

    async fn fetch(&self) -> Result<ObstacleSnapshot, BridgeError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let run = tokio::time::timeout(self.timeout, command.output()).await;
        let output = match run {
            Err(_) => {
                return Err(BridgeError::Obstacle(format!(
                    "probe {} exceeded {} ms",
                    self.program.display(),
                    self.timeout.as_millis()
                )));
            }
            Ok(Err(e)) => {
                return Err(BridgeError::Obstacle(format!(
                    "spawn {}: {e}",
                    self.program.display()
                )));
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(BridgeError::Obstacle(format!(
                "probe {} exited with {}",
                self.program.display(),
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_status_line(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_probe(script: &str) -> ProbeObstacleSource {
        ProbeObstacleSource::new("/bin/sh")
            .with_arg("-c")
            .with_arg(script)
    }

    #[tokio::test]
    async fn parses_probe_stdout() {
        let source = shell_probe("echo 'FRONT:0|LEFT:1|RIGHT:0'");
        let snap = source.fetch().await.unwrap();
        assert!(!snap.front);
        assert!(snap.left);
        assert!(!snap.right);
    }

    #[tokio::test]
    async fn probe_with_no_parseable_output_is_all_clear() {
        let source = shell_probe("echo 'sensor warming up'");
        let snap = source.fetch().await.unwrap();
        assert_eq!(snap, ObstacleSnapshot::all_clear());
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let source = shell_probe("echo 'FRONT:1'; exit 3");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, BridgeError::Obstacle(_)));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let source = ProbeObstacleSource::new("/nonexistent/ranging-probe");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, BridgeError::Obstacle(_)));
    }

    #[tokio::test]
    async fn overlong_run_is_killed_and_reported() {
        let source = shell_probe("sleep 5").with_timeout(Duration::from_millis(50));
        let err = source.fetch().await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("exceeded"), "unexpected error: {text}");
    }
}
