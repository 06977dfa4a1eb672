//! The input bit buffer.
//!
//! One producer (the input shell, through [`BitSink`]) appends symbols; one
//! consumer (the game loop, through [`BitBuffer`]) waits for a minimum length
//! and then removes a prefix. Waiting never consumes anything, so an
//! abandoned wait leaves the buffer intact.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::Error;
use crate::sync::CloseSignal;
use crate::types::Bit;

#[derive(Debug, Default)]
struct Shared {
    bits: Mutex<VecDeque<Bit>>,
    notify: Notify,
}

/// Append-only handle given to the input shell.
#[derive(Clone, Debug)]
pub struct BitSink {
    shared: Arc<Shared>,
}

impl BitSink {
    /// Append one symbol and wake the consumer.
    pub fn push(&self, bit: Bit) {
        self.shared.bits.lock().push_back(bit);
        self.shared.notify.notify_one();
    }

    /// Append every `0`/`1` in `s`, ignoring spaces. Returns the number of
    /// symbols appended, or `None` (appending nothing) if `s` holds anything else.
    pub fn push_str(&self, s: &str) -> Option<usize> {
        let bits = Bit::parse_str(s)?;
        if !bits.is_empty() {
            self.shared.bits.lock().extend(bits.iter().copied());
            self.shared.notify.notify_one();
        }
        Some(bits.len())
    }
}

/// Consumer side of the input queue, owned by the game session.
#[derive(Debug)]
pub struct BitBuffer {
    shared: Arc<Shared>,
    close: CloseSignal,
    poll_interval: Duration,
}

impl BitBuffer {
    #[must_use]
    pub fn new(poll_interval: Duration, close: CloseSignal) -> Self {
        BitBuffer {
            shared: Arc::new(Shared::default()),
            close,
            poll_interval,
        }
    }

    /// A new producer handle for this buffer.
    #[must_use]
    pub fn sink(&self) -> BitSink {
        BitSink {
            shared: Arc::clone(&self.shared),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.bits.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current contents, front first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Bit> {
        self.shared.bits.lock().iter().copied().collect()
    }

    /// Discard everything.
    pub fn reset(&self) {
        self.shared.bits.lock().clear();
    }

    /// Copy the first `n` symbols without removing them.
    #[must_use]
    pub fn peek(&self, n: usize) -> Option<Vec<Bit>> {
        let bits = self.shared.bits.lock();
        if bits.len() < n {
            return None;
        }
        Some(bits.iter().take(n).copied().collect())
    }

    /// Remove and return the first `n` symbols, or nothing if fewer are queued.
    #[must_use]
    pub fn try_take(&self, n: usize) -> Option<Vec<Bit>> {
        let mut bits = self.shared.bits.lock();
        if bits.len() < n {
            return None;
        }
        Some(bits.drain(..n).collect())
    }

    /// Suspend until at least `n` symbols are queued.
    ///
    /// Wakes on every append, and re-checks every `poll_interval` regardless.
    /// Returns [`Error::Cancelled`] once the close signal fires.
    pub async fn wait_for(&self, n: usize) -> Result<(), Error> {
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.len() >= n {
                return Ok(());
            }
            if self.close.is_closed() {
                return Err(Error::Cancelled);
            }

            tokio::select! {
                () = &mut notified => {}
                () = self.close.closed() => return Err(Error::Cancelled),
                () = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    /// Wait for `n` symbols, then remove and return them.
    pub async fn take(&self, n: usize) -> Result<Vec<Bit>, Error> {
        loop {
            self.wait_for(n).await?;
            if let Some(bits) = self.try_take(n) {
                return Ok(bits);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> BitBuffer {
        BitBuffer::new(Duration::from_millis(5), CloseSignal::new())
    }

    fn bits(s: &str) -> Vec<Bit> {
        Bit::parse_str(s).unwrap()
    }

    #[test]
    fn test_take_leaves_suffix() {
        let buf = buffer();
        buf.sink().push_str("1011001").unwrap();
        assert_eq!(buf.try_take(6), Some(bits("101100")));
        assert_eq!(buf.snapshot(), bits("1"));
        assert_eq!(buf.try_take(3), None);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_reset_always_empties() {
        let buf = buffer();
        buf.reset();
        assert!(buf.is_empty());
        buf.sink().push_str("0101 0101 01").unwrap();
        buf.reset();
        assert!(buf.is_empty());
        buf.reset();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_push_str_rejects_garbage() {
        let buf = buffer();
        assert_eq!(buf.sink().push_str("01a"), None);
        assert!(buf.is_empty());
        assert_eq!(buf.sink().push_str("0 1"), Some(2));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let buf = buffer();
        buf.sink().push(Bit::Zero);
        buf.sink().push(Bit::One);
        assert_eq!(buf.peek(2), Some(bits("01")));
        assert_eq!(buf.peek(3), None);
        assert_eq!(buf.len(), 2);
    }

    #[tokio::test]
    async fn test_take_waits_for_producer() {
        let buf = buffer();
        let sink = buf.sink();
        let producer = tokio::spawn(async move {
            for c in "110".chars() {
                tokio::time::sleep(Duration::from_millis(2)).await;
                sink.push(Bit::from_char(c).unwrap());
            }
        });
        let taken = buf.take(3).await.unwrap();
        assert_eq!(taken, bits("110"));
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn test_close_cancels_wait_without_consuming() {
        let close = CloseSignal::new();
        let buf = BitBuffer::new(Duration::from_secs(60), close.clone());
        buf.sink().push_str("01").unwrap();
        let closer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            close.close();
        });
        assert_eq!(buf.take(6).await, Err(Error::Cancelled));
        assert_eq!(buf.snapshot(), bits("01"));
        closer.await.unwrap();
    }
}
