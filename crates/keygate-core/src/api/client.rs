//! reqwest-backed auth client.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::USER_AGENT;
use super::errors::{AuthError, AuthResult, classify_reqwest_error};
use super::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// Default base URL for the auth service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment override for the base URL.
pub const BASE_URL_ENV: &str = "KEYGATE_API_BASE_URL";

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

/// Resolves the base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if the chosen URL does not parse.
pub fn resolve_base_url(config_base_url: Option<&str>) -> Result<String> {
    if let Ok(env_url) = std::env::var(BASE_URL_ENV) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(DEFAULT_BASE_URL.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid auth API base URL: {url}"))?;
    Ok(())
}

/// Client for the login and register endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    /// Creates a client for `base_url`. A `None` timeout disables it.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        validate_url(base_url)?;
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST {base}/auth/login`.
    ///
    /// # Errors
    /// Returns an [`AuthError`] on transport failure, non-2xx status, or a
    /// success body without a `token` string.
    pub async fn login(&self, request: &LoginRequest) -> AuthResult<LoginResponse> {
        self.post_json(LOGIN_PATH, request).await
    }

    /// `POST {base}/auth/register`.
    ///
    /// # Errors
    /// Returns an [`AuthError`] on transport failure, non-2xx status, or a
    /// success body without a `message` string.
    pub async fn register(&self, request: &RegisterRequest) -> AuthResult<RegisterResponse> {
        self.post_json(REGISTER_PATH, request).await
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> AuthResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "sending auth request");

        let response = self
            .http
            .post(&url)
            .header("accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        if !status.is_success() {
            let err = AuthError::http_status(status.as_u16(), &text);
            tracing::info!(%url, status = status.as_u16(), "auth request rejected");
            return Err(err);
        }

        tracing::debug!(%url, status = status.as_u16(), "auth request succeeded");
        serde_json::from_str(&text)
            .map_err(|e| AuthError::parse(format!("Unexpected response from {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::AuthErrorKind;

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".to_string(),
            password: "Valid1$pw".to_string(),
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = AuthClient::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(
            client.endpoint(LOGIN_PATH),
            "http://localhost:5000/api/auth/login"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(AuthClient::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_reads_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "email": "a@b.com",
                "password": "Valid1$pw"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "abc"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let resp = client.login(&login_request()).await.unwrap();
        assert_eq!(resp.token, "abc");
    }

    #[tokio::test]
    async fn test_register_reads_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "User registered successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let resp = client
            .register(&RegisterRequest {
                username: "abc_123".to_string(),
                email: "a@b.com".to_string(),
                password: "Valid1$pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.message, "User registered successfully");
    }

    #[tokio::test]
    async fn test_server_error_message_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Invalid email or password"
            })))
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let err = client.login(&login_request()).await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::HttpStatus);
        assert_eq!(err.status, Some(401));
        assert_eq!(
            err.server_message.as_deref(),
            Some("Invalid email or password")
        );
    }

    #[tokio::test]
    async fn test_success_without_token_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true
            })))
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let err = client.login(&login_request()).await.unwrap_err();
        assert_eq!(err.kind, AuthErrorKind::Parse);
        assert!(err.server_message.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind and drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = AuthClient::new(
            &format!("http://127.0.0.1:{port}"),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let err = client.login(&login_request()).await.unwrap_err();
        assert!(matches!(
            err.kind,
            AuthErrorKind::Connect | AuthErrorKind::Timeout | AuthErrorKind::Request
        ));
        assert!(err.status.is_none());
    }
}
