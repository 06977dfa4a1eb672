//! Synchronization primitives shared between the input shell and the game loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CloseInner {
    closed: AtomicBool,
    notify: Notify,
}

/// A cloneable "the shell has gone away" flag.
///
/// Closing wakes every task suspended in [`CloseSignal::closed`].
#[derive(Clone, Debug, Default)]
pub struct CloseSignal(Arc<CloseInner>);

impl CloseSignal {
    /// Create a new signal (initially open).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the signal has been closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.closed.load(Ordering::Acquire)
    }

    /// Close the signal and wake all waiters.
    pub fn close(&self) {
        self.0.closed.store(true, Ordering::Release);
        self.0.notify.notify_waiters();
    }

    /// Resolve once the signal is closed.
    pub async fn closed(&self) {
        loop {
            let notified = self.0.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent close is not missed.
            notified.as_mut().enable();
            if self.is_closed() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_close_signal_lifecycle() {
        let signal = CloseSignal::new();
        assert!(!signal.is_closed());
        signal.close();
        assert!(signal.is_closed());
    }

    #[test]
    fn test_close_signal_clone_shares_state() {
        let a = CloseSignal::new();
        let b = a.clone();
        a.close();
        assert!(b.is_closed());
    }

    #[tokio::test]
    async fn test_closed_wakes_waiter() {
        let signal = CloseSignal::new();
        let waiter = {
            let signal = signal.clone();
            tokio::spawn(async move { signal.closed().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.close();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter not woken")
            .unwrap();
    }

    #[tokio::test]
    async fn test_closed_returns_immediately_when_closed() {
        let signal = CloseSignal::new();
        signal.close();
        signal.closed().await;
    }
}
