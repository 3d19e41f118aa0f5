//! Per-store single-flight operation guards.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Tracks which operation kinds are currently in flight for one store.
///
/// `try_begin` hands out at most one [`Flight`] per operation name. The
/// flight releases its slot on drop, so error paths and early returns
/// cannot leave an operation stuck in the in-flight set.
#[derive(Clone, Default)]
pub(crate) struct OpGuard {
    in_flight: Arc<Mutex<HashSet<&'static str>>>,
}

impl OpGuard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `op`. Returns `None` if an identical operation is
    /// already running.
    pub(crate) fn try_begin(&self, op: &'static str) -> Option<Flight> {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if set.insert(op) {
            Some(Flight {
                guard: self.clone(),
                op,
            })
        } else {
            None
        }
    }
}

/// RAII handle for an in-flight operation slot.
pub(crate) struct Flight {
    guard: OpGuard,
    op: &'static str,
}

impl Drop for Flight {
    fn drop(&mut self) {
        let mut set = self
            .guard
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        set.remove(self.op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_of_same_op_is_rejected() {
        let guard = OpGuard::new();

        let flight = guard.try_begin("refresh");
        assert!(flight.is_some());
        assert!(guard.try_begin("refresh").is_none());
    }

    #[test]
    fn test_distinct_ops_run_concurrently() {
        let guard = OpGuard::new();

        let _refresh = guard.try_begin("refresh");
        assert!(guard.try_begin("add").is_some());
    }

    #[test]
    fn test_drop_releases_the_slot() {
        let guard = OpGuard::new();

        let flight = guard.try_begin("refresh");
        drop(flight);
        assert!(guard.try_begin("refresh").is_some());
    }

    #[test]
    fn test_clones_share_the_in_flight_set() {
        let guard = OpGuard::new();
        let clone = guard.clone();

        let _flight = guard.try_begin("pay");
        assert!(clone.try_begin("pay").is_none());
    }
}
