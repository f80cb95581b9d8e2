//! nodewatch - rendezvous port discovery and GPU telemetry for SLURM
//! allocations.
//!
//! Expands the allocation's node list, prints one TCP port that is free
//! on every node, then keeps a background sampler appending nvidia-smi
//! rows to per-host CSV logs until SIGUSR1 (or Ctrl-C) arrives.

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use nodewatch_cli::Args;
use nodewatch_core::ShutdownFlag;
use nodewatch_net::{TcpProbe, find_free_port};
use nodewatch_slurm::expand;
use nodewatch_telemetry::{Sampler, SamplerConfig, SshRemote};
use tokio::signal::unix::{SignalKind, signal};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let settings = args.settings();

    let hosts = expand(&settings.node_list);
    tracing::info!(hosts = hosts.len(), "expanded allocation node list");
    tracing::debug!(?hosts);

    let probe = TcpProbe::new();
    let port = find_free_port(&probe, &hosts, settings.port_min, settings.port_max)
        .await
        .into_diagnostic()?;
    tracing::info!(port, "selected rendezvous port");
    // Machine-consumable: launch scripts read the port from stdout.
    println!("{port}");

    if !settings.gpu_log {
        tracing::info!("gpu logging disabled");
        return Ok(());
    }
    let Some(job_id) = settings.job_id.clone() else {
        tracing::info!("no allocation id, skipping gpu logging");
        return Ok(());
    };

    let shutdown = ShutdownFlag::new();
    let sampler = Sampler::new(
        SamplerConfig {
            hosts,
            job_id,
            workdir: settings.workdir.clone(),
            interval: settings.interval,
            host_dir_prefix: settings.host_dir_prefix.clone(),
        },
        SshRemote,
        shutdown.clone(),
    );
    let worker = sampler.spawn();

    let mut usr1 = signal(SignalKind::user_defined1()).into_diagnostic()?;
    let flag = shutdown.clone();
    tokio::spawn(async move {
        usr1.recv().await;
        tracing::info!("received SIGUSR1, stopping after the current sweep");
        flag.request();
    });
    let flag = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, stopping after the current sweep");
            flag.request();
        }
    });

    worker.await.into_diagnostic()?;
    Ok(())
}
