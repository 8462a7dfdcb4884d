//! Auth service errors.

use std::fmt;

use super::types::ErrorBody;

/// Categories of auth request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Non-2xx response.
    HttpStatus,
    /// Request or connect timeout.
    Timeout,
    /// Could not reach the server.
    Connect,
    /// 2xx response whose body was not the expected shape.
    Parse,
    /// Anything else reqwest reports (builder, redirect, body errors).
    Request,
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthErrorKind::HttpStatus => write!(f, "http_status"),
            AuthErrorKind::Timeout => write!(f, "timeout"),
            AuthErrorKind::Connect => write!(f, "connect"),
            AuthErrorKind::Parse => write!(f, "parse"),
            AuthErrorKind::Request => write!(f, "request"),
        }
    }
}

/// Failure of a single auth request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    /// HTTP status, when a response arrived.
    pub status: Option<u16>,
    /// One-line diagnostic (for logs, not for the form).
    pub message: String,
    /// `message` field from the server's error body, if it sent one.
    pub server_message: Option<String>,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            server_message: None,
        }
    }

    /// Builds an HTTP status error, pulling `message` out of a JSON body.
    pub fn http_status(status: u16, body: &str) -> Self {
        let server_message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let message = match &server_message {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: AuthErrorKind::HttpStatus,
            status: Some(status),
            message,
            server_message,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Parse, message)
    }

    /// Text for the status message: the server's own words when present,
    /// otherwise the operation's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AuthError {}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

pub(crate) fn classify_reqwest_error(e: &reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::new(AuthErrorKind::Timeout, format!("Request timed out: {e}"))
    } else if e.is_connect() {
        AuthError::new(AuthErrorKind::Connect, format!("Connection failed: {e}"))
    } else if e.is_decode() {
        AuthError::new(AuthErrorKind::Parse, format!("Invalid response body: {e}"))
    } else {
        AuthError::new(AuthErrorKind::Request, format!("Network error: {e}"))
    }
}
