//! Abstract access to the deposit API

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Deposit, DepositId};

/// Operations of the deposit API used by the overview
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepositApi: Send + Sync {
    /// All deposits of the current user
    async fn list_deposits(&self) -> Result<Vec<Deposit>>;

    /// Delete a deposit
    async fn delete_deposit(&self, id: DepositId) -> Result<()>;

    /// Create an empty deposit
    async fn create_deposit(&self) -> Result<Deposit>;
}
