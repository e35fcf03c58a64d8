//! Skipped-check reuse registry.
//!
//! When a batch of commits is skipped, each gets a "Skipped" check. The first
//! run to discover one of them claims it, so later reconciliations reuse a
//! single visible check instead of adding one per commit.

use std::sync::{Mutex, PoisonError};

/// Single-slot record of the claimed skipped check.
///
/// Once claimed the slot is never cleared or overwritten.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    skipped_check_id: Mutex<Option<u64>>,
}

impl CheckRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the skip slot for `candidate`.
    ///
    /// Returns `true` only for the call that fills the empty slot; every
    /// later call is rejected and must not reuse its candidate.
    pub fn try_claim_skip_slot(&self, candidate: u64) -> bool {
        // The critical section cannot panic, so a poisoned lock still holds a
        // consistent value.
        let mut slot = self
            .skipped_check_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate);
        true
    }

    /// The claimed check id, if any.
    #[must_use]
    pub fn claimed(&self) -> Option<u64> {
        *self
            .skipped_check_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
