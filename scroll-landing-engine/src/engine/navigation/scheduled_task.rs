use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Pending<T> {
    due: Duration,
    payload: T,
}

/// Delayed callback with room for exactly one pending task.
///
/// Arming replaces whatever was pending, so there is never more than one
/// outstanding task per slot. Time is supplied by the caller; nothing runs in
/// the background.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for ScheduledTask<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ScheduledTask<T> {
    /// Schedule `payload` for `now + delay`, cancelling any pending task.
    /// Returns `true` if a pending task was replaced.
    pub fn arm(&mut self, now: Duration, delay: Duration, payload: T) -> bool {
        self.pending
            .replace(Pending {
                due: now + delay,
                payload,
            })
            .is_some()
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Remove and return the payload if its due time has been reached.
    pub fn take_due(&mut self, now: Duration) -> Option<T> {
        if self.due_at().is_some_and(|due| now >= due) {
            self.cancel()
        } else {
            None
        }
    }
}
