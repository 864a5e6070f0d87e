//! Session guard for routes that name an account id in their path

use crate::{
    auth::jwt::{TokenError, TokenService},
    error::AppError,
};
use axum::{
    extract::{FromRequestParts, RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;
use tower_cookies::Cookies;

/// Cookie carrying the raw session token
pub const SESSION_COOKIE: &str = "gb_session";

/// Path parameter compared against the token subject
pub const ID_PARAM: &str = "id";

/// Identity proven by the session guard (attached to request extensions)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub account_id: String,
    pub account_number: String,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 VerifiedIdentity
impl<S> FromRequestParts<S> for VerifiedIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Why the guard refused a request. Never shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("session cookie missing")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token subject does not match path id")]
    SubjectMismatch,
}

impl GuardError {
    /// Stable label for logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            GuardError::MissingToken => "missing_token",
            GuardError::Token(kind) => kind.as_str(),
            GuardError::SubjectMismatch => "subject_mismatch",
        }
    }
}

/// Decide whether a request may act on `path_id`.
///
/// The comparison is exact and case-sensitive. A missing or empty id never
/// matches.
pub fn authorize(
    tokens: &TokenService,
    token: Option<&str>,
    path_id: Option<&str>,
) -> Result<VerifiedIdentity, GuardError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(GuardError::MissingToken)?;

    let claims = tokens.validate(token)?;

    match path_id {
        Some(id) if !id.is_empty() && id == claims.account_id => Ok(VerifiedIdentity {
            account_id: claims.account_id,
            account_number: claims.account_number,
        }),
        _ => Err(GuardError::SubjectMismatch),
    }
}

/// 会话守卫中间件 - 令牌主体必须与路径 id 一致
pub async fn session_guard_middleware(
    State(tokens): State<Arc<TokenService>>,
    cookies: Cookies,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let path_id = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|params| {
            params
                .iter()
                .find(|(key, _)| *key == ID_PARAM)
                .map(|(_, value)| value.to_string())
        });

    let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let identity = match authorize(&tokens, token.as_deref(), path_id.as_deref()) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(
                reason = e.reason(),
                path = %parts.uri.path(),
                "Session guard denied request"
            );
            metrics::counter!("auth_guard_denied_total", "reason" => e.reason()).increment(1);
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(account_id = %identity.account_id, "Session guard passed");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
