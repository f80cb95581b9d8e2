//! Immutable runtime configuration.
//!
//! Built once at startup from CLI arguments and the allocation
//! environment, then passed by value into each component. Nothing
//! mutates it afterwards.

use camino::Utf8PathBuf;
use std::time::Duration;

/// Runtime configuration snapshot.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base directory for per-job log trees.
    pub workdir: Utf8PathBuf,

    /// Compact node-list expression for the allocation (may be empty).
    pub node_list: String,

    /// Allocation id, if one is known.
    pub job_id: Option<String>,

    /// Whether per-host GPU usage logging is enabled.
    pub gpu_log: bool,

    /// Sleep between full sampling passes.
    pub interval: Duration,

    /// Lower bound of the rendezvous port search range.
    pub port_min: u16,

    /// Upper bound of the rendezvous port search range (inclusive).
    pub port_max: u16,

    /// Directory name prefix for per-host log directories.
    pub host_dir_prefix: String,
}

impl Settings {
    /// Sampling requires both the feature flag and a known allocation;
    /// without a job id there is nowhere to write logs to.
    pub fn sampling_enabled(&self) -> bool {
        self.gpu_log && self.job_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings {
            workdir: Utf8PathBuf::from("."),
            node_list: String::new(),
            job_id: Some("42".to_string()),
            gpu_log: true,
            interval: Duration::from_secs(30),
            port_min: 2048,
            port_max: 65500,
            host_dir_prefix: "node".to_string(),
        }
    }

    #[test]
    fn test_sampling_enabled() {
        assert!(base().sampling_enabled());

        let mut disabled = base();
        disabled.gpu_log = false;
        assert!(!disabled.sampling_enabled());

        let mut no_job = base();
        no_job.job_id = None;
        assert!(!no_job.sampling_enabled());
    }
}
