// src/exclusive.rs

//! Process-wide exclusive claim on the full-screen output.
//!
//! The physical display is a single-owner resource: two engines presenting
//! to it at once would destroy the timing contract. The claim is an explicit
//! RAII handle rather than ambient state, so tests can construct and tear
//! down engines repeatedly within one process.

use crate::error::ScreenError;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};

static CLAIMED: AtomicBool = AtomicBool::new(false);

/// Held for the lifetime of an engine; released on drop.
#[derive(Debug)]
pub struct DisplayClaim {
    _private: (),
}

impl DisplayClaim {
    /// Claim the output. Fails if another engine in this process holds it.
    pub fn acquire() -> Result<Self, ScreenError> {
        if CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScreenError::AlreadyActive);
        }
        info!("DisplayClaim: acquired");
        Ok(DisplayClaim { _private: () })
    }
}

impl Drop for DisplayClaim {
    fn drop(&mut self) {
        CLAIMED.store(false, Ordering::Release);
        info!("DisplayClaim: released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test covering the whole lifecycle: the claim is process-global,
    // so splitting these assertions across tests would make them race.
    #[test]
    fn claim_lifecycle() {
        let claim = DisplayClaim::acquire().expect("first claim");
        assert!(matches!(
            DisplayClaim::acquire(),
            Err(ScreenError::AlreadyActive)
        ));
        drop(claim);
        let again = DisplayClaim::acquire().expect("claim after release");
        drop(again);
    }
}
