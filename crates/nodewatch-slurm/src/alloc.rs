//! Allocation context from the SLURM environment.

use std::env;

/// Environment snapshot for the current allocation, if any.
///
/// Missing variables are `None` rather than errors; the caller decides
/// which degraded behavior applies (loopback expansion, sampling
/// skipped).
#[derive(Debug, Clone, Default)]
pub struct AllocationContext {
    /// Allocation id (`SLURM_JOB_ID`).
    pub job_id: Option<String>,
    /// Compact node list (`SLURM_JOB_NODELIST`, older `SLURM_NODELIST`).
    pub node_list: Option<String>,
}

impl AllocationContext {
    /// Read the allocation context from the process environment.
    pub fn from_env() -> Self {
        let job_id = env::var("SLURM_JOB_ID").ok().filter(|s| !s.is_empty());
        let node_list = env::var("SLURM_JOB_NODELIST")
            .or_else(|_| env::var("SLURM_NODELIST"))
            .ok()
            .filter(|s| !s.is_empty());

        if job_id.is_none() {
            tracing::debug!("no SLURM_JOB_ID in environment");
        }

        Self { job_id, node_list }
    }
}
