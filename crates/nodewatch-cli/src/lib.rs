//! CLI argument parsing for nodewatch.

use camino::Utf8PathBuf;
use clap::Parser;
use nodewatch_core::Settings;
use nodewatch_slurm::AllocationContext;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "nodewatch")]
#[command(about = "Pick a free rendezvous port and log per-host GPU usage for a SLURM allocation")]
pub struct Args {
    /// Base directory for per-job log trees
    #[arg(long, default_value = ".")]
    pub workdir: Utf8PathBuf,

    /// Node-list expression override (defaults to SLURM_JOB_NODELIST)
    #[arg(long)]
    pub nodelist: Option<String>,

    /// Allocation id override (defaults to SLURM_JOB_ID)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Disable per-host GPU usage logging
    #[arg(long, env = "NODEWATCH_NO_GPU_LOG")]
    pub no_gpu_log: bool,

    /// Seconds to sleep between sampling passes
    #[arg(long, env = "NODEWATCH_INTERVAL", default_value = "30")]
    pub interval: u64,

    /// Lower bound of the port search range
    #[arg(long, default_value = "2048")]
    pub port_min: u16,

    /// Upper bound of the port search range (inclusive)
    #[arg(long, default_value = "65500")]
    pub port_max: u16,

    /// Directory name prefix for per-host log directories
    #[arg(long, default_value = "node")]
    pub log_prefix: String,
}

impl Args {
    /// Merge CLI overrides with the allocation environment into an
    /// immutable settings snapshot.
    pub fn settings(&self) -> Settings {
        let alloc = AllocationContext::from_env();
        self.settings_with(alloc)
    }

    fn settings_with(&self, alloc: AllocationContext) -> Settings {
        Settings {
            workdir: self.workdir.clone(),
            node_list: self
                .nodelist
                .clone()
                .or(alloc.node_list)
                .unwrap_or_default(),
            job_id: self.job_id.clone().or(alloc.job_id),
            gpu_log: !self.no_gpu_log,
            interval: Duration::from_secs(self.interval),
            port_min: self.port_min,
            port_max: self.port_max,
            host_dir_prefix: self.log_prefix.clone(),
        }
    }
}
