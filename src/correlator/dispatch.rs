//! Dispatch identity tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identity of one `notify` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DispatchToken(u64);

impl DispatchToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dispatch-{}", self.0)
    }
}

/// The single active-dispatch slot shared by a notifier and its correlators.
///
/// Last writer wins: each [`begin`](Self::begin) supersedes every token
/// issued before it, whether or not those dispatches have finished.
#[derive(Debug, Clone, Default)]
pub struct ActiveDispatch {
    current: Arc<AtomicU64>,
}

impl ActiveDispatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token and make it the active one.
    pub fn begin(&self) -> DispatchToken {
        DispatchToken(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The active token, if any dispatch has begun.
    #[must_use]
    pub fn current(&self) -> Option<DispatchToken> {
        match self.current.load(Ordering::SeqCst) {
            0 => None,
            id => Some(DispatchToken(id)),
        }
    }

    #[must_use]
    pub fn is_active(&self, token: DispatchToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }
}
