//! Cooperative shutdown flag.
//!
//! Shared between signal listeners and the sampling worker. The worker
//! polls it at well-defined checkpoints (once per full host sweep), so
//! cancellation granularity is one sweep, not an immediate abort.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable handle to a shared shutdown request.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. There is no way to clear the flag.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_shared_across_clones() {
        let flag = ShutdownFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_requested());

        flag.request();
        assert!(observer.is_requested());
    }
}
