//! Per-host GPU telemetry sampling for nodewatch.
//!
//! A background worker sweeps the allocation's hosts, runs `nvidia-smi`
//! on each over ssh, and appends the rows to per-host CSV logs.

pub mod remote;
pub mod sampler;
pub mod session;

pub use remote::{ExecOutput, RemoteExec, SshRemote};
pub use sampler::{Sampler, SamplerConfig};
pub use session::{GPU_FIELDS, SessionError, TelemetrySession};
