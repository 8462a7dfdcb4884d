//! HTTP client for the remote authentication service.
//!
//! Two endpoints, both `POST` with JSON bodies:
//! - `{base}/auth/login` → `{ "token": "..." }`
//! - `{base}/auth/register` → `{ "message": "..." }`
//!
//! Error responses may carry `{ "message": "..." }`, which is surfaced verbatim.

mod client;
mod errors;
mod types;

pub use client::{
    AuthClient, BASE_URL_ENV, DEFAULT_BASE_URL, LOGIN_PATH, REGISTER_PATH, resolve_base_url,
};
pub use errors::{AuthError, AuthErrorKind, AuthResult};
pub use types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("keygate/", env!("CARGO_PKG_VERSION"));
