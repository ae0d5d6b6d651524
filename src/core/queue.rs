//! Pending-message counter shared between machines.

use std::cell::Cell;
use std::rc::Rc;

/// Count of outbound messages waiting to be sent.
///
/// The counter is owned by the assembling caller and handed to every machine
/// that touches it through [`QueueCounter::share`]. Dispatch is
/// single-threaded and run-to-completion, so only the action currently
/// executing can write to it.
///
/// Enqueue and dequeue actions are expected to be balanced. A dequeue on an
/// empty counter is reported and leaves the count at zero.
///
/// # Example
///
/// ```rust
/// use hsm_dispatch::core::QueueCounter;
///
/// let producer = QueueCounter::new();
/// let consumer = producer.share();
///
/// producer.enqueue();
/// assert_eq!(consumer.count(), 1);
/// assert_eq!(consumer.dequeue(), Some(0));
/// assert!(producer.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct QueueCounter {
    count: Rc<Cell<u32>>,
}

impl QueueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle onto the same counter.
    pub fn share(&self) -> Self {
        Self {
            count: Rc::clone(&self.count),
        }
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Record one more pending message, returning the new count.
    pub fn enqueue(&self) -> u32 {
        let count = self.count.get().saturating_add(1);
        self.count.set(count);
        count
    }

    /// Take one pending message, returning the new count.
    ///
    /// Returns `None` when nothing was pending.
    pub fn dequeue(&self) -> Option<u32> {
        match self.count.get().checked_sub(1) {
            Some(count) => {
                self.count.set(count);
                Some(count)
            }
            None => {
                tracing::error!("dequeue on an empty message queue");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counter_is_empty() {
        let queue = QueueCounter::new();
        assert_eq!(queue.count(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn shared_handles_see_the_same_count() {
        let owner = QueueCounter::new();
        let borrower = owner.share();

        owner.enqueue();
        owner.enqueue();
        assert_eq!(borrower.count(), 2);

        borrower.dequeue();
        assert_eq!(owner.count(), 1);
    }

    #[test]
    fn balanced_sequence_returns_to_zero() {
        let queue = QueueCounter::new();
        for expected in 1..=5 {
            assert_eq!(queue.enqueue(), expected);
        }
        for expected in (0..5).rev() {
            assert_eq!(queue.dequeue(), Some(expected));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn dequeue_on_empty_leaves_count_at_zero() {
        let queue = QueueCounter::new();
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.count(), 0);
    }
}
