use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of admission requests decided by this process.
///
/// Starts at zero on every start; it is not persisted and is independent per replica.
#[derive(Debug, Default)]
pub struct DecisionCounter {
    value: Mutex<u64>,
}

/// Exclusive access to the counter for the duration of one decision.
///
/// Reading and advancing through the same slot can't interleave with any other request.
pub struct DecisionSlot<'a> {
    guard: MutexGuard<'a, u64>,
}

impl DecisionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until no other request holds the counter.
    pub fn acquire(&self) -> DecisionSlot<'_> {
        // A panic while holding the lock can't leave a plain integer half written
        let guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        DecisionSlot { guard }
    }

    /// Current value, for reporting only
    pub fn current(&self) -> u64 {
        *self.acquire().guard
    }
}

impl<'a> DecisionSlot<'a> {
    pub fn peek(&self) -> u64 {
        *self.guard
    }

    pub fn advance(&mut self) {
        *self.guard += 1;
    }
}
