//! Lifecycle state for a modal form instance.
//!
//! Everything here is plain data so the contract can be exercised without a
//! browser: the content slot, the per-form submission guard, the request
//! sequence that drops stale responses, and the one-time install guard.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use once_cell::sync::OnceCell;

/// Failure text shown when a fragment fails to load.
pub const LOAD_FAILED: &str = "There was an error loading the form.";

/// Failure text shown when a submission fails.
pub const SUBMIT_FAILED: &str = "There was an error with your submission.";

/// What the dialog body currently holds.
///
/// `Empty` is the only state a closed dialog may be in; `close()` restores it
/// unconditionally so the next open always starts from a blank slate.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogContent {
    Empty,
    Loading,
    /// Server-rendered form fragment.
    Markup(String),
    /// Post-submission acknowledgment.
    Notice {
        heading: &'static str,
        body: &'static str,
    },
    Failed(&'static str),
}

/// At-most-one-in-flight submission flag.
///
/// Duplicate attempts while a submission is outstanding are dropped, not
/// queued. The flag is released when the exchange settles, success or not.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: AtomicBool,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the in-flight slot. Returns false if a submission is already
    /// outstanding.
    pub fn try_acquire(&self) -> bool {
        !self.in_flight.swap(true, Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Generation counter for fragment fetches.
///
/// Every open() takes a new ticket; a response whose ticket is no longer
/// current lost the race to a newer open() or to close() and must be
/// discarded instead of overwriting the dialog.
#[derive(Debug, Default)]
pub struct RequestSequence {
    current: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation and return its ticket.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidate all outstanding tickets without starting a new request.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.load(Ordering::SeqCst) == ticket
    }
}

/// One-time execution guard for event binding.
///
/// Re-running initialization is a detectable no-op, not an error, so a page
/// that includes the bundle twice still binds one set of handlers.
#[derive(Debug, Default)]
pub struct InitGuard {
    done: OnceCell<()>,
}

impl InitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once.
    pub fn acquire(&self) -> bool {
        self.done.set(()).is_ok()
    }

    pub fn is_done(&self) -> bool {
        self.done.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_guard_drops_duplicates() {
        let guard = SubmissionGuard::new();
        assert!(guard.try_acquire());
        assert!(!guard.try_acquire());
        assert!(!guard.try_acquire());
        assert!(guard.is_in_flight());
    }

    #[test]
    fn test_submission_guard_accepts_after_settle() {
        let guard = SubmissionGuard::new();
        assert!(guard.try_acquire());
        guard.release();
        assert!(guard.try_acquire());
    }

    #[test]
    fn test_request_sequence_drops_stale_ticket() {
        let sequence = RequestSequence::new();
        let first = sequence.begin();
        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }

    #[test]
    fn test_request_sequence_invalidate_orphans_pending_fetch() {
        let sequence = RequestSequence::new();
        let ticket = sequence.begin();
        sequence.invalidate();
        assert!(!sequence.is_current(ticket));
    }

    #[test]
    fn test_init_guard_runs_once() {
        let init = InitGuard::new();
        assert!(!init.is_done());
        assert!(init.acquire());
        assert!(!init.acquire());
        assert!(!init.acquire());
        assert!(init.is_done());
    }
}
