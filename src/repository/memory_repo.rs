//! In-memory account store, for tests and database-less local runs

use super::AccountStore;
use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
    // number -> id
    numbers: DashMap<String, String>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: &Account) -> Result<String, AppError> {
        if self.accounts.contains_key(&account.id) {
            return Err(AppError::Conflict(format!("account id {} already taken", account.id)));
        }

        // 账号唯一性检查与占位在同一个分片锁内完成
        match self.numbers.entry(account.number.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "account number {} already taken",
                account.number
            ))),
            Entry::Vacant(slot) => {
                slot.insert(account.id.clone());
                self.accounts.insert(account.id.clone(), account.clone());
                Ok(account.id.clone())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.get(id).map(|a| a.value().clone()))
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Account>, AppError> {
        let Some(id) = self.numbers.get(number).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        self.find_by_id(&id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        match self.accounts.remove(id) {
            Some((_, account)) => {
                self.numbers.remove(&account.number);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|a| a.value().clone()).collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }
}
