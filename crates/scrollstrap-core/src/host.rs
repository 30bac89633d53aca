//! Readiness model for the hosting surface.
//!
//! The bootstrap guard defers its first readiness check until the document
//! leaves the `loading` state. This is a small watch-channel state holder
//! the guard can either sample or await.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Lifecycle state of the hosting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    /// Still parsing; scripts may not run setup yet
    Loading,
    /// Parsed and scriptable; setup may run
    Interactive,
    /// Fully loaded, subresources included
    Complete,
}

impl ReadyState {
    /// Whether the host is far enough along for setup to run.
    pub fn is_ready(&self) -> bool {
        *self >= ReadyState::Interactive
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Loading => write!(f, "loading"),
            ReadyState::Interactive => write!(f, "interactive"),
            ReadyState::Complete => write!(f, "complete"),
        }
    }
}

/// Shared handle to the host document's ready state.
///
/// Transitions are monotonic: an `advance` to an earlier state is ignored,
/// so subscribers never observe the document moving backwards.
#[derive(Debug, Clone)]
pub struct HostDocument {
    tx: Arc<watch::Sender<ReadyState>>,
}

impl HostDocument {
    pub fn new(initial: ReadyState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Current ready state.
    pub fn ready_state(&self) -> ReadyState {
        *self.tx.borrow()
    }

    /// Advance to a later state; earlier states are ignored.
    pub fn advance(&self, state: ReadyState) {
        let changed = self.tx.send_if_modified(|current| {
            if state > *current {
                *current = state;
                true
            } else {
                false
            }
        });
        if changed {
            debug!("Host document is now {}", state);
        }
    }

    pub fn mark_interactive(&self) {
        self.advance(ReadyState::Interactive);
    }

    pub fn mark_complete(&self) {
        self.advance(ReadyState::Complete);
    }

    /// Subscribe to ready-state changes.
    pub fn subscribe(&self) -> watch::Receiver<ReadyState> {
        self.tx.subscribe()
    }
}

impl Default for HostDocument {
    fn default() -> Self {
        Self::new(ReadyState::Loading)
    }
}
