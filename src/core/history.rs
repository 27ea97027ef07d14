//! State history tracking.
//!
//! The history is an append-only log of `(state, timestamp)` pairs recorded
//! once per completed step. Entries are never edited or reordered; the only
//! way to drop them is `clear`, which the machine calls on shutdown.

use super::state::SystemState;
use serde::{Deserialize, Serialize};

/// Record of the machine being in a state at a point in time.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::{HistoryEntry, SystemState};
///
/// let entry = HistoryEntry::new(SystemState::Idle, 1_000);
/// assert_eq!(entry.state, SystemState::Idle);
/// assert_eq!(entry.timestamp, 1_000);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The state after the step completed
    pub state: SystemState,
    /// Clock reading when the step completed, in milliseconds
    pub timestamp: u64,
}

impl HistoryEntry {
    pub fn new(state: SystemState, timestamp: u64) -> Self {
        Self { state, timestamp }
    }
}

/// Ordered history of visited states.
///
/// # Example
///
/// ```rust
/// use operator_fsm::core::{HistoryEntry, StateHistory, SystemState};
///
/// let mut history = StateHistory::seeded(SystemState::Init, 0);
/// history.record(HistoryEntry::new(SystemState::Idle, 1_000));
/// history.record(HistoryEntry::new(SystemState::Movement, 2_000));
///
/// assert_eq!(history.len(), 3);
/// assert_eq!(
///     history.get_path(),
///     vec![SystemState::Init, SystemState::Idle, SystemState::Movement]
/// );
/// assert_eq!(history.duration(), Some(2_000));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHistory {
    entries: Vec<HistoryEntry>,
}

impl StateHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a history holding a single seed entry.
    pub fn seeded(state: SystemState, timestamp: u64) -> Self {
        Self {
            entries: vec![HistoryEntry::new(state, timestamp)],
        }
    }

    /// Append an entry at the end of the log.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Read-only copy of every entry, oldest first.
    ///
    /// Later records or a `clear` do not affect a snapshot already taken.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// States in the order they were recorded.
    pub fn get_path(&self) -> Vec<SystemState> {
        self.entries.iter().map(|entry| entry.state).collect()
    }

    /// Milliseconds between the first and last entry.
    ///
    /// Returns `None` for an empty history and `Some(0)` for a single entry.
    pub fn duration(&self) -> Option<u64> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => Some(last.timestamp.saturating_sub(first.timestamp)),
            _ => None,
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
