//! Database repository layer

pub mod account_repo;
pub mod memory_repo;

pub use account_repo::*;
pub use memory_repo::*;

use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;

/// Persistence seam for accounts.
///
/// Implementations enforce uniqueness of both `id` and `number`; a duplicate
/// number is reported as `AppError::Conflict`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account and return the stored id
    async fn create(&self, account: &Account) -> Result<String, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError>;

    async fn find_by_number(&self, number: &str) -> Result<Option<Account>, AppError>;

    /// Returns false when no account had that id
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// All accounts, newest first
    async fn list(&self) -> Result<Vec<Account>, AppError>;
}
