//! Remote command execution over ssh.
//!
//! Commands are structured (host, program, argv) rather than shell
//! strings. Anything that keeps the command from running — unreachable
//! host, auth failure, missing ssh binary — reads as a non-zero status,
//! not a distinct error type; callers only distinguish success from
//! failure.

use async_trait::async_trait;
use tokio::process::Command;

/// Result of one remote invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub status: i32,
    pub stdout: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Remote execution seam. Production goes through ssh; tests substitute
/// a recording mock.
#[async_trait]
pub trait RemoteExec: Send + Sync {
    async fn run(&self, host: &str, program: &str, args: &[&str]) -> ExecOutput;
}

/// ssh-backed remote execution. Relies on pre-configured host trust;
/// batch mode keeps a missing key from hanging on a password prompt.
#[derive(Debug, Clone, Default)]
pub struct SshRemote;

#[async_trait]
impl RemoteExec for SshRemote {
    async fn run(&self, host: &str, program: &str, args: &[&str]) -> ExecOutput {
        let mut cmd = Command::new("ssh");
        cmd.arg("-o")
            .arg("BatchMode=yes")
            .arg(host)
            .arg("--")
            .arg(program)
            .args(args);

        match cmd.output().await {
            Ok(output) => ExecOutput {
                status: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            },
            Err(e) => {
                tracing::debug!(host = %host, "failed to spawn ssh: {e}");
                ExecOutput {
                    status: -1,
                    stdout: String::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_output_success() {
        let ok = ExecOutput {
            status: 0,
            stdout: String::new(),
        };
        assert!(ok.success());

        let failed = ExecOutput {
            status: 255,
            stdout: String::new(),
        };
        assert!(!failed.success());
    }
}
