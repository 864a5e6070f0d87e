//! 账户服务：注册、登录、查询、删除

use crate::{
    auth::{jwt::TokenService, password::PasswordHasher},
    config::AppConfig,
    error::AppError,
    models::{account::*, auth::*},
    repository::AccountStore,
};
use std::{future::Future, sync::Arc, time::Duration};
use validator::Validate;

/// Fresh numbers drawn before a signup gives up on number collisions
const MAX_NUMBER_ATTEMPTS: u32 = 3;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    token_service: Arc<TokenService>,
    hasher: PasswordHasher,
    config: Arc<AppConfig>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        token_service: Arc<TokenService>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            token_service,
            hasher: PasswordHasher::new(),
            config,
        }
    }

    /// 账号 + 密码登录
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let account = self
            .bounded("find_by_number", self.store.find_by_number(&req.number))
            .await?;

        let Some(account) = account else {
            let hasher = self.hasher.clone();
            let password = req.password;
            blocking(move || {
                hasher.verify_dummy(&password);
                Ok(())
            })
            .await?;

            tracing::info!(number = %req.number, "Login failed: unknown account number");
            return Err(AppError::NotFound(format!("account {}", req.number)));
        };

        let hasher = self.hasher.clone();
        let hash = account.password_hash.clone();
        let password = req.password;
        if let Err(e) = blocking(move || hasher.verify(&password, &hash)).await {
            tracing::info!(number = %account.number, "Login failed: wrong password");
            return Err(e);
        }

        let token = self.token_service.issue(&account)?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(LoginResponse {
            token,
            number: account.number,
        })
    }

    /// 创建账户并自动登录
    pub async fn create_account(&self, req: CreateAccountRequest) -> Result<CreatedAccount, AppError> {
        req.validate()
            .map_err(|e| AppError::Malformed(e.to_string()))?;
        PasswordHasher::validate_password_policy(&req.password, &self.config)?;

        let hasher = self.hasher.clone();
        let password = req.password;
        let password_hash = blocking(move || hasher.hash(&password)).await?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let mut account = Account::new(
                req.first_name.clone(),
                req.last_name.clone(),
                generate_account_number(),
                password_hash.clone(),
            );

            match self.bounded("create", self.store.create(&account)).await {
                Ok(id) => {
                    account.id = id;
                    let token = self.token_service.issue(&account)?;

                    tracing::info!(account_id = %account.id, "Account created");

                    return Ok(CreatedAccount {
                        id: account.id,
                        token,
                    });
                }
                Err(AppError::Conflict(reason)) if attempt < MAX_NUMBER_ATTEMPTS => {
                    tracing::warn!(attempt, %reason, "Account number collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Conflict("could not allocate a unique account number".to_string()))
    }

    /// 列出所有账户
    pub async fn list_accounts(&self) -> Result<Vec<AccountResponse>, AppError> {
        let accounts = self.bounded("list", self.store.list()).await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    /// 获取账户详情
    pub async fn get_account(&self, id: &str) -> Result<AccountResponse, AppError> {
        self.bounded("find_by_id", self.store.find_by_id(id))
            .await?
            .map(AccountResponse::from)
            .ok_or_else(|| AppError::not_found(&format!("account {}", id)))
    }

    /// 删除账户
    pub async fn delete_account(&self, id: &str) -> Result<(), AppError> {
        if !self.bounded("delete", self.store.delete(id)).await? {
            return Err(AppError::not_found(&format!("account {}", id)));
        }

        tracing::info!(account_id = %id, "Account deleted");
        Ok(())
    }

    /// 为存储调用加上超时
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let limit = Duration::from_secs(self.config.store.timeout_secs);

        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(op, timeout_secs = limit.as_secs(), "Account store call timed out");
                metrics::counter!("store_timeouts_total", "op" => op).increment(1);
                Err(AppError::StoreUnavailable(format!("{} timed out", op)))
            }
        }
    }
}

/// Argon2 work runs off the async workers
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {}", e)))?
}
