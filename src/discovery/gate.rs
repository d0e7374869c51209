//! One-shot success gate.

use std::sync::atomic::{AtomicBool, Ordering};

/// Lets exactly one of several racing probes claim the win.
#[derive(Debug, Default)]
pub struct SuccessGate {
    claimed: AtomicBool,
}

impl SuccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns true for the first caller only.
    pub fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}
