//! Deposits as listed by the deposit API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a deposit
pub type DepositId = Uuid;

/// Lifecycle state of a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositState {
    /// Being edited by the depositor
    Draft,
    /// Handed in, awaiting processing
    Submitted,
    /// Being processed by a data manager
    InProgress,
    /// Sent back to the depositor
    Rejected,
    /// Archived; no further changes
    Archived,
}

impl DepositState {
    /// Whether the depositor may still edit a deposit in this state
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

/// One deposit in the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    /// Deposit identifier
    pub id: DepositId,
    /// Dataset title
    pub title: String,
    /// Lifecycle state
    pub state: DepositState,
    /// Explanation of the state, e.g. why it was rejected
    #[serde(default)]
    pub state_description: String,
    /// Creation date
    pub date: DateTime<Utc>,
}

impl Deposit {
    /// Whether the depositor may still edit this deposit
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.state.is_editable()
    }
}
