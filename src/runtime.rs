//! Shared runtime pieces behind resource fetches.
//!
//! [`FetchCycle`] owns the ordering and cancellation rules for one fetch
//! instance: every new cycle supersedes the previous one, and only the result
//! of the current cycle of a mounted instance may be published.

pub mod request;

use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, AbortRegistration};

use crate::errors::ApiError;

/// How a fetch cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome<T> {
    /// The request completed, successfully or not
    Settled(Result<T, ApiError>),
    /// The request was aborted before completion
    Canceled,
}

/// Identifies one fetch cycle of a [`FetchCycle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket(u64);

#[derive(Default)]
struct CycleInner {
    generation: u64,
    in_flight: Option<AbortHandle>,
    mounted: bool,
}

/// Generation counter, abort handle and mount flag of one fetch instance.
///
/// Cloning yields another handle to the same cycle; the spawned request task
/// keeps one to settle its result.
#[derive(Clone, Default)]
pub struct FetchCycle {
    inner: Arc<Mutex<CycleInner>>,
}

impl FetchCycle {
    /// Create an unmounted cycle controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owning instance as mounted; cycles may begin afterwards
    pub fn mount(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.mounted = true;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lock().map(|inner| inner.mounted).unwrap_or(false)
    }

    /// Start a new cycle, aborting the one still in flight
    ///
    /// Returns `None` once the instance is unmounted.
    pub fn begin(&self) -> Option<(CycleTicket, AbortRegistration)> {
        let mut inner = self.inner.lock().ok()?;
        if !inner.mounted {
            return None;
        }
        if let Some(previous) = inner.in_flight.take() {
            previous.abort();
        }
        inner.generation += 1;
        let (handle, registration) = AbortHandle::new_pair();
        inner.in_flight = Some(handle);
        Some((CycleTicket(inner.generation), registration))
    }

    /// Abort the in-flight request, if any, and invalidate its ticket
    ///
    /// Returns true if a request was in flight.
    pub fn cancel(&self) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        inner.generation += 1;
        match inner.in_flight.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Run `apply` if `ticket` is still the current cycle of a mounted instance
    ///
    /// `apply` runs under the cycle lock, so a concurrent `cancel` or `begin`
    /// either happens entirely before it (and `apply` is skipped) or after it.
    pub fn settle(&self, ticket: CycleTicket, apply: impl FnOnce()) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        if !inner.mounted || inner.generation != ticket.0 {
            return false;
        }
        inner.in_flight = None;
        apply();
        true
    }

    /// Whether a cycle is currently in flight
    pub fn in_flight(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.in_flight.is_some())
            .unwrap_or(false)
    }

    /// Abort everything and refuse further cycles and settlements
    pub fn unmount(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.mounted = false;
            inner.generation += 1;
            if let Some(handle) = inner.in_flight.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_cycle_refuses_to_begin() {
        let cycle = FetchCycle::new();
        assert!(cycle.begin().is_none());
        cycle.mount();
        assert!(cycle.begin().is_some());
    }

    #[test]
    fn stale_ticket_is_not_applied() {
        let cycle = FetchCycle::new();
        cycle.mount();
        let (first, _) = cycle.begin().unwrap();
        let (second, _) = cycle.begin().unwrap();

        let mut applied = Vec::new();
        assert!(!cycle.settle(first, || applied.push("first")));
        assert!(cycle.settle(second, || applied.push("second")));
        assert_eq!(applied, vec!["second"]);
        assert!(!cycle.in_flight());
    }

    #[test]
    fn cancel_invalidates_current_ticket() {
        let cycle = FetchCycle::new();
        cycle.mount();
        let (ticket, _) = cycle.begin().unwrap();
        assert!(cycle.cancel());
        assert!(!cycle.cancel());
        assert!(!cycle.settle(ticket, || panic!("canceled cycle must not settle")));
    }

    #[test]
    fn unmount_blocks_settlement() {
        let cycle = FetchCycle::new();
        cycle.mount();
        let (ticket, _) = cycle.begin().unwrap();
        cycle.unmount();
        assert!(!cycle.is_mounted());
        assert!(!cycle.settle(ticket, || panic!("unmounted cycle must not settle")));
    }
}
