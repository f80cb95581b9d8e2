//! Free-port discovery for nodewatch.
//!
//! Distributed launchers need one TCP port that is unbound on every
//! node of the allocation. Probing is done with plain connect attempts.

pub mod probe;

pub use probe::{
    DEFAULT_MAX_PORT, DEFAULT_MIN_PORT, PortProbe, ProbeError, TcpProbe, find_free_port,
    is_free_on_all,
};
