//! External stop request for a running machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked once per run-loop iteration.
///
/// Clones share the same flag, so a handle taken before `run` can halt it
/// from another thread or from inside a collaborator.
///
/// # Example
///
/// ```rust
/// use operator_fsm::effects::StopSignal;
///
/// let signal = StopSignal::new();
/// let handle = signal.clone();
/// handle.stop();
/// assert!(signal.is_stopped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
