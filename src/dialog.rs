//! Rollback confirmation after a layout change.

use std::time::{Duration, Instant};

/// Default time the user has to confirm a new layout.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(15);

/// Answer to "keep these display settings?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAnswer {
    Yes,
    No,
}

/// A blocking yes/no prompt with a timeout.
///
/// `exec` returns once the user answers or `timeout` elapses; an elapsed
/// timeout must be reported as [`DialogAnswer::No`].
pub trait RollbackDialog {
    fn exec(&mut self, timeout: Duration) -> DialogAnswer;
}

/// Implement RollbackDialog for closures.
impl<F> RollbackDialog for F
where
    F: FnMut(Duration) -> DialogAnswer,
{
    fn exec(&mut self, timeout: Duration) -> DialogAnswer {
        self(timeout)
    }
}

/// A confirmation that is waiting for an answer inside an event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingConfirmation {
    started: Instant,
    timeout: Duration,
}

impl PendingConfirmation {
    pub fn new(started: Instant, timeout: Duration) -> Self {
        Self { started, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time left before the confirmation counts as declined.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.timeout
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_dialog_receives_timeout() {
        let mut seen = None;
        let mut dialog = |timeout: Duration| {
            seen = Some(timeout);
            DialogAnswer::Yes
        };
        assert_eq!(dialog.exec(DEFAULT_CONFIRM_TIMEOUT), DialogAnswer::Yes);
        assert_eq!(seen, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_pending_confirmation_countdown() {
        let start = Instant::now();
        let pending = PendingConfirmation::new(start, Duration::from_secs(15));

        assert_eq!(pending.remaining(start), Duration::from_secs(15));
        assert_eq!(
            pending.remaining(start + Duration::from_secs(10)),
            Duration::from_secs(5)
        );
        assert!(!pending.is_expired(start + Duration::from_millis(14_999)));
        assert!(pending.is_expired(start + Duration::from_secs(15)));
        assert!(pending.is_expired(start + Duration::from_secs(60)));
    }
}
