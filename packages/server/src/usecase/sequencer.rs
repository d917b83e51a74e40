//! Relay-wide critical section.

use tokio::sync::{Mutex, MutexGuard};

/// Serializes store mutations with their fan-out.
///
/// While a guard is held no other relay operation can append, clear, or add a
/// connection to the fan-out set. A joining connection therefore receives its
/// `load-drawings` before any event that is not already part of its snapshot.
#[derive(Debug, Default)]
pub struct RelaySequencer {
    lock: Mutex<()>,
}

impl RelaySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
