//! Cooperative cancellation for running traversals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Cancellation flag shared between a traversal and whoever may stop it.
///
/// Strategies poll the signal once per iteration. An aborted traversal ends
/// quietly: [`Traverser::traverse`](super::Traverser::traverse) returns
/// `Ok(())` with whatever the visitor recorded so far.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Creates a signal that is not aborted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    /// Returns `Error::Aborted` if cancellation was requested.
    pub fn throw_if_aborted(&self) -> Result<()> {
        if self.is_aborted() {
            return Err(Error::Aborted);
        }
        Ok(())
    }
}
