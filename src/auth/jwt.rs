//! Session token issuance and validation
//! Tokens are HS256-signed JWTs carrying the account identity

use crate::{config::AppConfig, error::AppError, models::account::Account};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issuer written into and required from every session token
pub const ISSUER: &str = "gobank";

/// Shortest token lifetime accepted, in seconds
pub const MIN_TOKEN_TTL_SECS: u64 = 30;

/// Longest token lifetime accepted, in seconds
pub const MAX_TOKEN_TTL_SECS: u64 = 86_400;

/// Algorithms accepted on validation. Anything outside the HMAC family is refused.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Identity claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account ID
    #[serde(rename = "accountId")]
    pub account_id: String,

    /// Public account number
    #[serde(rename = "accountNumber")]
    pub account_number: String,

    /// Issuer
    pub iss: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Reason a token failed validation.
///
/// Callers that gate requests collapse every variant into one denial; the
/// variant itself is kept for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,

    #[error("token expired")]
    Expired,
}

impl TokenError {
    /// Stable label for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::UnsupportedAlgorithm => "unsupported_algorithm",
            TokenError::Expired => "expired",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::UnsupportedAlgorithm
            }
            _ => TokenError::Malformed,
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: Option<String>,
}

/// Token service. Holds the process-wide signing secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenService {
    /// Create token service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            config.security.jwt_secret.expose_secret(),
            config.security.token_ttl_secs,
        )
    }

    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&ttl_secs) {
            return Err(AppError::Config(format!(
                "token ttl must be between {} and {} seconds",
                MIN_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        })
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a token for the account, valid from now
    pub fn issue(&self, account: &Account) -> Result<String, AppError> {
        self.issue_at(account, Utc::now())
    }

    /// Issue a token as if the clock read `now`
    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> Result<String, AppError> {
        let expiration = now + Duration::seconds(self.ttl_secs as i64);

        let claims = Claims {
            account_id: account.id.clone(),
            account_number: account.number.clone(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {:?}", e);
            AppError::Internal(format!("Failed to encode session token: {}", e))
        })
    }

    /// Validate and decode token
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        check_asserted_algorithm(token)?;

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let kind = TokenError::from(e);
                tracing::debug!(reason = kind.as_str(), "Token validation failed");
                kind
            })
    }
}

/// Reads the `alg` the token claims for itself before any key is involved, so
/// `none` and asymmetric algorithms are refused up front.
fn check_asserted_algorithm(token: &str) -> Result<(), TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header.trim_end_matches('='))
        .map_err(|_| TokenError::Malformed)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    match raw.alg.as_deref() {
        Some("HS256" | "HS384" | "HS512") => Ok(()),
        Some(_) => Err(TokenError::UnsupportedAlgorithm),
        None => Err(TokenError::Malformed),
    }
}
