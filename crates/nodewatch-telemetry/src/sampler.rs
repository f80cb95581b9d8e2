//! Background sampling loop.
//!
//! One worker task sweeps every host in expansion order, then sleeps.
//! The shutdown flag is polled once per full sweep: a request landing
//! mid-sweep lets the sweep finish, and one landing during the sleep
//! allows one more sweep before exit. Per-host failures are warnings;
//! the loop always moves on to the next host.

use crate::remote::RemoteExec;
use crate::session::{GPU_FIELDS, SessionError, TelemetrySession};
use camino::Utf8PathBuf;
use nodewatch_core::ShutdownFlag;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("remote sampler exited with status {status}")]
    Remote { status: i32 },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Configuration snapshot for one sampling worker.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Hosts in expansion order; duplicates are sampled twice per pass.
    pub hosts: Vec<String>,
    pub job_id: String,
    pub workdir: Utf8PathBuf,
    /// Sleep between full passes.
    pub interval: Duration,
    /// Directory name prefix for per-host log directories.
    pub host_dir_prefix: String,
}

/// GPU telemetry sampler.
pub struct Sampler<R: RemoteExec> {
    config: SamplerConfig,
    remote: R,
    shutdown: ShutdownFlag,
    /// Per-host sessions, created lazily on first sample.
    sessions: HashMap<String, TelemetrySession>,
}

impl<R: RemoteExec + 'static> Sampler<R> {
    pub fn new(config: SamplerConfig, remote: R, shutdown: ShutdownFlag) -> Self {
        Self {
            config,
            remote,
            shutdown,
            sessions: HashMap::new(),
        }
    }

    /// Start the worker in the background.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Main sampling loop. Runs until shutdown is requested.
    pub async fn run(mut self) {
        tracing::info!(
            job_id = %self.config.job_id,
            hosts = self.config.hosts.len(),
            interval_secs = self.config.interval.as_secs(),
            "gpu sampler started"
        );

        let hosts = self.config.hosts.clone();
        loop {
            for host in &hosts {
                if let Err(e) = self.sample_host(host).await {
                    tracing::warn!(host = %host, "gpu sample failed: {e}");
                }
            }

            if self.shutdown.is_requested() {
                break;
            }
            sleep(self.config.interval).await;
        }

        tracing::info!(job_id = %self.config.job_id, "gpu sampler stopped");
    }

    /// Sample one host: ensure its log exists, run nvidia-smi remotely,
    /// append the captured rows.
    async fn sample_host(&mut self, host: &str) -> Result<(), SampleError> {
        if !self.sessions.contains_key(host) {
            let session = TelemetrySession::new(
                &self.config.workdir,
                &self.config.job_id,
                &self.config.host_dir_prefix,
                host,
            );
            self.sessions.insert(host.to_string(), session);
        }
        let session = &self.sessions[host];
        session.ensure_initialized()?;

        let query = format!("--query-gpu={GPU_FIELDS}");
        let output = self
            .remote
            .run(host, "nvidia-smi", &[&query, "--format=csv,noheader"])
            .await;

        if !output.success() {
            return Err(SampleError::Remote {
                status: output.status,
            });
        }

        session.append_rows(&output.stdout)?;
        Ok(())
    }
}
