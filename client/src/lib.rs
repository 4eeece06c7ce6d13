//! Deposit overview client
//!
//! Keeps the state behind the overview of a depositor's datasets: which
//! deposits exist, which are being deleted, whether a new one is being
//! created, and what went wrong. The deposit API itself is abstract; see
//! [`DepositApi`].

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod model;
pub mod overview;

pub use api::DepositApi;
pub use error::{ApiError, Result};
pub use model::{Deposit, DepositId, DepositState};
pub use overview::{CreatingState, DeletingState, DepositOverview, LoadingState, OverviewState};
