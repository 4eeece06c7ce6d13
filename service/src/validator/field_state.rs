//! Per-field verification state

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::Serialize;

/// Where the remote check of one identifier field stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// Never checked
    #[default]
    Idle,
    /// Lookup in flight
    Checking,
    /// Identifier accepted
    Valid,
    /// Identifier rejected by the lookup service
    Invalid,
    /// Lookup failed; accepted anyway
    Unverifiable,
}

impl FieldState {
    /// Whether the field may be submitted as it is
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid | Self::Unverifiable)
    }

    /// Whether a check has finished
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Valid | Self::Invalid | Self::Unverifiable)
    }
}

/// Ticket for one started check
///
/// Only the most recent check of a field may settle it; an older check that
/// finishes late is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket(u64);

/// Concurrent map from identifier path to its state
#[derive(Debug, Default)]
pub struct FieldStates {
    states: DashMap<String, (u64, FieldState)>,
    generation: AtomicU64,
}

impl FieldStates {
    /// Empty map; every field starts [`FieldState::Idle`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a field
    #[must_use]
    pub fn get(&self, field: &str) -> FieldState {
        self.states.get(field).map(|entry| entry.1).unwrap_or_default()
    }

    /// Mark a field as being checked
    pub fn begin(&self, field: &str) -> CheckTicket {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.states
            .insert(field.to_string(), (generation, FieldState::Checking));
        CheckTicket(generation)
    }

    /// Record the outcome of a check
    ///
    /// Returns `false` when a later check of the same field has started
    /// since, in which case the outcome is dropped.
    pub fn finish(&self, field: &str, ticket: CheckTicket, state: FieldState) -> bool {
        match self.states.get_mut(field) {
            Some(mut entry) if entry.0 == ticket.0 => {
                entry.1 = state;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of all known states
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, FieldState)> {
        let mut states: Vec<_> = self
            .states
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().1))
            .collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }

    /// Forget every field
    pub fn clear(&self) {
        self.states.clear();
    }
}
