//! Fire-and-forget transient notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::info;

/// Sink for transient user-facing messages
pub trait Notifier {
    fn notify(&mut self, message: String, now: Instant);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

/// Toasts shown one at a time, oldest first, each for `duration`
#[derive(Debug)]
pub struct ToastQueue {
    duration: Duration,
    queue: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            queue: VecDeque::new(),
        }
    }

    /// Drop expired toasts and return the one to display
    pub fn current(&mut self, now: Instant) -> Option<&Toast> {
        while self.queue.front().is_some_and(|toast| toast.expires_at <= now) {
            self.queue.pop_front();
        }
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: String, now: Instant) {
        info!(%message, "toast");
        // Queued toasts wait behind the ones in front of them
        let start = self
            .queue
            .back()
            .map(|last| last.expires_at.max(now))
            .unwrap_or(now);
        self.queue.push_back(Toast {
            message,
            expires_at: start + self.duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_in_order() {
        let t0 = Instant::now();
        let mut toasts = ToastQueue::new(Duration::from_secs(2));
        toasts.notify("first".into(), t0);
        toasts.notify("second".into(), t0);

        assert_eq!(toasts.current(t0).map(|t| t.message.as_str()), Some("first"));
        assert_eq!(
            toasts.current(t0 + Duration::from_secs(2)).map(|t| t.message.as_str()),
            Some("second")
        );
        assert!(toasts.current(t0 + Duration::from_secs(4)).is_none());
        assert!(toasts.is_empty());
    }
}
