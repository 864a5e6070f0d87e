//! Authentication and authorization module

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{
    authorize, session_guard_middleware, GuardError, VerifiedIdentity, SESSION_COOKIE,
};
pub use password::PasswordHasher;
