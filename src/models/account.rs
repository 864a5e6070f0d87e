//! Account domain models

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Number of digits in a public account number
pub const ACCOUNT_NUMBER_DIGITS: usize = 10;

/// Bank account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Public-facing handle, distinct from `id`
    pub number: String,
    /// Argon2 PHC string, never plaintext
    pub password_hash: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh account with a server-generated id and zero balance
    pub fn new(first_name: String, last_name: String, number: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name,
            last_name,
            number,
            password_hash,
            balance: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// Random zero-padded account number, independent of the account id
pub fn generate_account_number() -> String {
    let n: u64 = rand::thread_rng().gen_range(0..10_000_000_000);
    format!("{:0width$}", n, width = ACCOUNT_NUMBER_DIGITS)
}

/// Create account request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub password: String,
}

/// Account response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub number: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            number: account.number,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}
