// src/exec/runner.rs

//! Runs the mailer process once and classifies how it ended.

use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::errors::{MailgateError, ProcessFailure, Result};
use crate::exec::Invocation;

/// How the mailer process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { code: Option<i32>, stderr: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Turn a failed run into the error the binary exits with.
    pub fn into_result(self) -> Result<()> {
        match self {
            Outcome::Success => Ok(()),
            Outcome::Failure { code, stderr } => Err(MailgateError::ExternalProcessFailure(
                ProcessFailure::NonZeroExit { code, stderr },
            )),
        }
    }
}

/// Spawn the mailer, wait for it, and report the outcome.
///
/// Stdout and stderr are captured. When `timeout` elapses the child is
/// killed and a [`ProcessFailure::TimedOut`] error is returned.
pub async fn run_invocation(invocation: &Invocation, timeout: Option<Duration>) -> Result<Outcome> {
    info!(command = %invocation.redacted(), "starting mailer process");

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning mailer process '{}'", invocation.program))?;

    let wait = child.wait_with_output();
    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, wait).await {
            Ok(res) => res,
            Err(_) => {
                // Dropping the future drops the child, which kills it.
                warn!(timeout = ?limit, "mailer process timed out; killed");
                return Err(MailgateError::ExternalProcessFailure(
                    ProcessFailure::TimedOut(limit),
                ));
            }
        },
        None => wait.await,
    }
    .with_context(|| format!("waiting for mailer process '{}'", invocation.program))?;

    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!("mailer stdout: {}", line);
    }

    let code = output.status.code();
    info!(
        exit_code = ?code,
        success = output.status.success(),
        "mailer process exited"
    );

    if output.status.success() {
        return Ok(Outcome::Success);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    error!(exit_code = ?code, stderr = %stderr, "error executing mailer command");
    Ok(Outcome::Failure { code, stderr })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Invocation {
        Invocation {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            env: vec![("MAILGATE_TEST_VALUE".to_string(), "42".to_string())],
        }
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        let outcome = run_invocation(&sh("echo sent"), None).await.unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let outcome = run_invocation(&sh("echo 'smtp refused' >&2; exit 3"), None)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Failure {
                code: Some(3),
                stderr: "smtp refused".to_string()
            }
        );
        assert!(matches!(
            outcome.into_result(),
            Err(MailgateError::ExternalProcessFailure(ProcessFailure::NonZeroExit { .. }))
        ));
    }

    #[tokio::test]
    async fn env_is_passed_to_child() {
        let outcome = run_invocation(&sh(r#"test "$MAILGATE_TEST_VALUE" = 42"#), None)
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn slow_process_times_out() {
        let err = run_invocation(&sh("sleep 5"), Some(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MailgateError::ExternalProcessFailure(ProcessFailure::TimedOut(_))
        ));
    }

    #[tokio::test]
    async fn missing_program_is_an_error_not_a_panic() {
        let inv = Invocation {
            program: "mailgate-no-such-program".to_string(),
            args: vec![],
            env: vec![],
        };
        let err = run_invocation(&inv, None).await.unwrap_err();
        assert!(matches!(err, MailgateError::Other(_)));
    }
}
