//! Non-interactive submission driver.
//!
//! Runs one full submit cycle against a form: validate, call the service,
//! settle, and carry out the resulting follow-ups. The TUI drives the same
//! form controllers through its own effect loop instead.

use anyhow::Result;

use crate::api::AuthClient;
use crate::forms::{
    FollowUp, LoginForm, Outcome, RegisterForm, ScheduledRedirect, Settlement, SubmitDecision,
};
use crate::status::StatusMessage;
use crate::token::TokenSink;

/// Opens a URL once a redirect comes due.
pub trait Navigator: Send + Sync {
    /// # Errors
    /// Returns an error if the URL could not be opened.
    fn navigate(&self, url: &str) -> Result<()>;
}

/// What a submit cycle produced.
#[derive(Debug, Clone, Default)]
pub struct WorkflowReport {
    /// `None` when the form was busy and nothing happened.
    pub outcome: Option<Outcome>,
    /// Status message left on the form.
    pub message: Option<StatusMessage>,
    /// Navigation the caller should perform (see [`follow_redirect`]).
    pub redirect: Option<ScheduledRedirect>,
    /// Non-fatal problems hit while carrying out follow-ups.
    pub warnings: Vec<String>,
}

impl WorkflowReport {
    pub fn is_success(&self) -> bool {
        self.outcome == Some(Outcome::Success)
    }
}

/// Submits the login form and stores the issued token.
pub async fn run_login(
    form: &mut LoginForm,
    client: &AuthClient,
    tokens: &dyn TokenSink,
) -> WorkflowReport {
    let (id, request) = match form.begin_submit() {
        SubmitDecision::Proceed { id, request } => (id, request),
        SubmitDecision::Rejected { .. } => return rejected(form.status().current()),
        SubmitDecision::Busy => return WorkflowReport::default(),
    };

    let result = client.login(&request).await;
    let Some(settlement) = form.settle(id, result) else {
        return WorkflowReport::default();
    };
    report_for(settlement, form.status().current(), tokens)
}

/// Submits the registration form.
///
/// Invalid input is rejected locally and never reaches `client`.
pub async fn run_register(form: &mut RegisterForm, client: &AuthClient) -> WorkflowReport {
    let (id, request) = match form.begin_submit() {
        SubmitDecision::Proceed { id, request } => (id, request),
        SubmitDecision::Rejected { .. } => return rejected(form.status().current()),
        SubmitDecision::Busy => return WorkflowReport::default(),
    };

    let result = client.register(&request).await;
    match form.settle(id, result) {
        Some(settlement) => WorkflowReport {
            outcome: Some(settlement.outcome),
            message: form.status().current().cloned(),
            ..WorkflowReport::default()
        },
        None => WorkflowReport::default(),
    }
}

fn rejected(message: Option<&StatusMessage>) -> WorkflowReport {
    WorkflowReport {
        outcome: Some(Outcome::Failed),
        message: message.cloned(),
        ..WorkflowReport::default()
    }
}

fn report_for(
    settlement: Settlement,
    message: Option<&StatusMessage>,
    tokens: &dyn TokenSink,
) -> WorkflowReport {
    let mut report = WorkflowReport {
        outcome: Some(settlement.outcome),
        message: message.cloned(),
        ..WorkflowReport::default()
    };
    for follow_up in settlement.follow_ups {
        match follow_up {
            FollowUp::StoreToken(token) => {
                if let Err(e) = tokens.put(&token) {
                    tracing::error!(error = %format!("{e:#}"), "failed to store auth token");
                    report.warnings.push(format!("Could not save login token: {e:#}"));
                }
            }
            FollowUp::Redirect(redirect) => report.redirect = Some(redirect),
        }
    }
    report
}

/// Waits out the redirect delay, then navigates.
///
/// # Errors
/// Returns an error if the navigator fails.
pub async fn follow_redirect(
    redirect: &ScheduledRedirect,
    navigator: &dyn Navigator,
) -> Result<()> {
    tokio::time::sleep(redirect.delay).await;
    tracing::info!(url = %redirect.url, "redirecting");
    navigator.navigate(&redirect.url)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::forms::{
        LOGIN_FALLBACK_MESSAGE, LOGIN_SUCCESS_MESSAGE, LoginField, REGISTER_INVALID_MESSAGE,
        RegisterField,
    };
    use crate::status::StatusKind;

    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<String>>,
    }

    impl TokenSink for RecordingSink {
        fn put(&self, token: &str) -> Result<()> {
            self.writes.lock().unwrap().push(token.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl TokenSink for FailingSink {
        fn put(&self, _token: &str) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) -> Result<()> {
            self.visits.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn filled_login() -> LoginForm {
        let mut form = LoginForm::default();
        form.set_field(LoginField::Email, "a@b.com".to_string());
        form.set_field(LoginField::Password, "whatever".to_string());
        form
    }

    #[tokio::test]
    async fn test_login_success_stores_token_once_and_schedules_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let sink = RecordingSink::default();
        let mut form = filled_login();

        let report = run_login(&mut form, &client, &sink).await;

        assert!(report.is_success());
        assert_eq!(*sink.writes.lock().unwrap(), vec!["abc".to_string()]);
        let redirect = report.redirect.unwrap();
        assert_eq!(redirect.delay, Duration::from_millis(1500));
        assert_eq!(report.message.unwrap().text, LOGIN_SUCCESS_MESSAGE);
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let sink = RecordingSink::default();
        let mut form = filled_login();

        let report = run_login(&mut form, &client, &sink).await;

        assert_eq!(report.outcome, Some(Outcome::Failed));
        assert!(report.redirect.is_none());
        assert!(sink.writes.lock().unwrap().is_empty());
        let message = report.message.unwrap();
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.text, "Invalid credentials");
        assert!(!form.is_busy());
    }

    #[tokio::test]
    async fn test_login_unparseable_error_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let mut form = filled_login();

        let report = run_login(&mut form, &client, &RecordingSink::default()).await;

        assert_eq!(report.message.unwrap().text, LOGIN_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_token_write_failure_is_a_warning() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "abc"})),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let mut form = filled_login();

        let report = run_login(&mut form, &client, &FailingSink).await;

        assert!(report.is_success());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("disk full"));
    }

    #[tokio::test]
    async fn test_invalid_registration_never_calls_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let mut form = RegisterForm::default();
        form.set_field(RegisterField::Username, "abc_123".to_string());
        form.set_field(RegisterField::Email, "a@b.com".to_string());
        form.set_field(RegisterField::Password, "short1!".to_string());

        let report = run_register(&mut form, &client).await;

        assert_eq!(report.outcome, Some(Outcome::Failed));
        assert_eq!(report.message.unwrap().text, REGISTER_INVALID_MESSAGE);
        // Mock expectations are verified when `server` drops.
    }

    #[tokio::test]
    async fn test_valid_registration_posts_once_and_clears_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"message": "Welcome aboard"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AuthClient::new(&server.uri(), None).unwrap();
        let mut form = RegisterForm::default();
        form.set_field(RegisterField::Username, "abc_123".to_string());
        form.set_field(RegisterField::Email, "a@b.com".to_string());
        form.set_field(RegisterField::Password, "Valid1$pw".to_string());

        let report = run_register(&mut form, &client).await;

        assert!(report.is_success());
        assert_eq!(report.message.unwrap().text, "Welcome aboard");
        assert_eq!(form.value(RegisterField::Username), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_redirect_waits_for_delay() {
        let navigator = Arc::new(RecordingNavigator::default());
        let redirect = ScheduledRedirect {
            url: "https://example.com/dashboard".to_string(),
            delay: Duration::from_millis(1500),
        };

        let task = {
            let navigator = Arc::clone(&navigator);
            tokio::spawn(async move { follow_redirect(&redirect, navigator.as_ref()).await })
        };
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1499)).await;
        tokio::task::yield_now().await;
        assert!(navigator.visits.lock().unwrap().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        task.await.unwrap().unwrap();
        assert_eq!(
            *navigator.visits.lock().unwrap(),
            vec!["https://example.com/dashboard".to_string()]
        );
    }
}
