//! Quiescence timer for text input.
//!
//! Every [`Debouncer::schedule`] replaces the pending value and restarts the
//! window; the value is released only once the window passes without new
//! input. Deadlines use the tokio clock, so paused-time tests are exact.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels whatever was pending.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Takes the value if its window has already elapsed.
    pub fn poll_ready(&mut self) -> Option<T> {
        match self.deadline() {
            Some(deadline) if Instant::now() >= deadline => self.cancel(),
            _ => None,
        }
    }

    /// Waits out the window and takes the value. Returns `None` at once when
    /// nothing is pending.
    pub async fn fire(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.cancel()
    }
}
