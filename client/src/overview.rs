//! State of the deposit overview

use std::collections::HashMap;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::DepositApi;
use crate::error::Result;
use crate::model::{Deposit, DepositId};

/// Progress of loading the deposit list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingState {
    /// Request in flight
    pub loading: bool,
    /// List available
    pub loaded: bool,
    /// Why the last load failed
    pub loading_error: Option<String>,
}

/// Progress of deleting one deposit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletingState {
    /// Request in flight
    pub deleting: bool,
    /// Why the delete failed
    pub delete_error: Option<String>,
}

/// Progress of creating a new deposit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatingState {
    /// Request in flight
    pub creating: bool,
    /// Why the creation failed
    pub create_error: Option<String>,
    /// The deposit just created
    pub new_deposit: Option<DepositId>,
}

/// Everything the overview shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewState {
    /// Deposit list progress
    pub loading: LoadingState,
    /// Deposits, newest first
    pub deposits: IndexMap<DepositId, Deposit>,
    /// Delete progress per deposit
    pub deleting: HashMap<DepositId, DeletingState>,
    /// Create-new progress
    pub creating_new: CreatingState,
}

/// Overview of the depositor's deposits
///
/// Operations never fail outright: the error is returned and also kept in
/// the state so it can be shown until the next attempt. The state lock is
/// never held across an API call.
pub struct DepositOverview<A: DepositApi> {
    api: A,
    state: RwLock<OverviewState>,
}

impl<A: DepositApi> DepositOverview<A> {
    /// Empty overview over `api`
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(OverviewState::default()),
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> OverviewState {
        self.state.read().clone()
    }

    /// Whether the deposit exists and may be edited
    #[must_use]
    pub fn is_editable(&self, id: DepositId) -> bool {
        self.state
            .read()
            .deposits
            .get(&id)
            .is_some_and(Deposit::is_editable)
    }

    /// (Re)load the deposit list
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also stored as the loading error.
    pub async fn fetch_deposits(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            state.loading = LoadingState {
                loading: true,
                ..LoadingState::default()
            };
        }

        let result = self.api.list_deposits().await;

        let mut state = self.state.write();
        match result {
            Ok(mut deposits) => {
                deposits.sort_by(|a, b| b.date.cmp(&a.date));
                debug!(count = deposits.len(), "deposits loaded");
                state.deposits = deposits.into_iter().map(|d| (d.id, d)).collect();
                state.loading = LoadingState {
                    loaded: true,
                    ..LoadingState::default()
                };
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load deposits");
                state.loading = LoadingState {
                    loading_error: Some(e.to_string()),
                    ..LoadingState::default()
                };
                Err(e)
            }
        }
    }

    /// Delete a deposit
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also stored for this deposit only.
    pub async fn delete_deposit(&self, id: DepositId) -> Result<()> {
        self.state.write().deleting.insert(
            id,
            DeletingState {
                deleting: true,
                delete_error: None,
            },
        );

        let result = self.api.delete_deposit(id).await;

        let mut state = self.state.write();
        match result {
            Ok(()) => {
                debug!(%id, "deposit deleted");
                state.deposits.shift_remove(&id);
                state.deleting.remove(&id);
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to delete deposit");
                state.deleting.insert(
                    id,
                    DeletingState {
                        deleting: false,
                        delete_error: Some(e.to_string()),
                    },
                );
                Err(e)
            }
        }
    }

    /// Create a new deposit and put it at the top of the list
    ///
    /// # Errors
    ///
    /// Returns the API error, which is also stored as the create error.
    pub async fn create_new_deposit(&self) -> Result<DepositId> {
        self.state.write().creating_new = CreatingState {
            creating: true,
            ..CreatingState::default()
        };

        let result = self.api.create_deposit().await;

        let mut state = self.state.write();
        match result {
            Ok(deposit) => {
                let id = deposit.id;
                debug!(%id, "deposit created");
                state.deposits.shift_insert(0, id, deposit);
                state.creating_new = CreatingState {
                    new_deposit: Some(id),
                    ..CreatingState::default()
                };
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "failed to create deposit");
                state.creating_new = CreatingState {
                    create_error: Some(e.to_string()),
                    ..CreatingState::default()
                };
                Err(e)
            }
        }
    }

    /// Forget everything, as when leaving the overview
    pub fn clean_deposits(&self) {
        *self.state.write() = OverviewState::default();
    }

    /// Messages for the failures currently in the state
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        let state = self.state.read();
        let mut alerts = Vec::new();

        if let Some(e) = &state.loading.loading_error {
            alerts.push(format!(
                "An error occurred: {e}. Cannot load data from the server."
            ));
        }

        let mut failed_deletes: Vec<_> = state
            .deleting
            .iter()
            .filter_map(|(id, deleting)| deleting.delete_error.as_ref().map(|e| (id, e)))
            .collect();
        failed_deletes.sort();
        for (id, e) in failed_deletes {
            alerts.push(match state.deposits.get(id) {
                Some(deposit) => format!(
                    "Cannot delete deposit '{}'. An error occurred: {e}.",
                    deposit.title
                ),
                None => format!("Cannot delete a deposit. An error occurred: {e}."),
            });
        }

        if let Some(e) = &state.creating_new.create_error {
            alerts.push(format!(
                "An error occurred: {e}. Cannot create a new dataset. Please try again."
            ));
        }

        alerts
    }
}
