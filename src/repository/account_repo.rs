//! Account repository (PostgreSQL 数据访问层)

use super::AccountStore;
use crate::{error::AppError, models::account::Account};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct AccountRepository {
    db: PgPool,
}

impl AccountRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    /// 创建账户
    async fn create(&self, account: &Account) -> Result<String, AppError> {
        let inserted_id: String = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (id, first_name, last_name, number, password_hash, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&account.id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.number)
        .bind(&account.password_hash)
        .bind(account.balance)
        .bind(account.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(format!("account number {} already taken", account.number))
            }
            other => {
                tracing::error!(error = %other, "Failed to insert account");
                AppError::Database(other)
            }
        })?;

        Ok(inserted_id)
    }

    /// 根据 ID 查找账户
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    /// 根据账号查找账户
    async fn find_by_number(&self, number: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.db)
            .await?;

        Ok(account)
    }

    /// 删除账户
    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 列出所有账户
    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts =
            sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(accounts)
    }
}
