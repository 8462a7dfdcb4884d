//! Login form controller.
//!
//! The login form does no client-side gating: every submit that is not
//! blocked by the busy flag goes to the network.

use std::fmt;

use super::submission::{
    FollowUp, Outcome, ScheduledRedirect, Settlement, Submission, SubmissionId, SubmitDecision,
    SubmitPhase,
};
use super::FormSettings;
use crate::api::{AuthResult, LoginRequest, LoginResponse};
use crate::status::{ExpiryTicket, StatusSlot};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please check your credentials and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub const ALL: [LoginField; 2] = [LoginField::Email, LoginField::Password];

    pub fn label(self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, LoginField::Password)
    }

    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields: previous and next coincide.
        self.next()
    }
}

pub struct LoginForm {
    email: String,
    password: String,
    submission: Submission,
    status: StatusSlot,
    settings: FormSettings,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("submission", &self.submission)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(&FormSettings::default())
    }
}

impl LoginForm {
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            submission: Submission::default(),
            status: StatusSlot::new(settings.message_ttl),
            settings: settings.clone(),
        }
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    /// Replaces a field value. No live validation on this form.
    pub fn set_field(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.submission.is_busy()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.submission.phase()
    }

    pub fn status(&self) -> &StatusSlot {
        &self.status
    }

    /// Clears the status message if `ticket` still owns it.
    pub fn expire_status(&mut self, ticket: ExpiryTicket) -> bool {
        self.status.expire(ticket)
    }

    fn request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn begin_submit(&mut self) -> SubmitDecision<LoginRequest> {
        match self.submission.begin() {
            Some(id) => {
                tracing::info!(submission = id.0, "login submission started");
                SubmitDecision::Proceed {
                    id,
                    request: self.request(),
                }
            }
            None => SubmitDecision::Busy,
        }
    }

    /// Applies the outcome of submission `id`.
    ///
    /// Returns `None` when `id` is no longer the active submission (the form
    /// was reset meanwhile); the late result is dropped.
    pub fn settle(
        &mut self,
        id: SubmissionId,
        result: AuthResult<LoginResponse>,
    ) -> Option<Settlement> {
        if !self.submission.finish_if_active(id) {
            tracing::debug!(submission = id.0, "ignoring stale login result");
            return None;
        }

        let settlement = match result {
            Ok(resp) if !resp.token.trim().is_empty() => {
                tracing::info!(submission = id.0, "login succeeded");
                Settlement {
                    outcome: Outcome::Success,
                    ticket: self.status.success(LOGIN_SUCCESS_MESSAGE),
                    follow_ups: vec![
                        FollowUp::StoreToken(resp.token),
                        FollowUp::Redirect(ScheduledRedirect {
                            url: self.settings.redirect_url.clone(),
                            delay: self.settings.redirect_delay,
                        }),
                    ],
                }
            }
            Ok(_) => {
                tracing::warn!(submission = id.0, "login response carried an empty token");
                self.failed(LOGIN_FALLBACK_MESSAGE.to_string())
            }
            Err(err) => {
                tracing::warn!(submission = id.0, kind = %err.kind, error = %err, "login failed");
                self.failed(err.user_message(LOGIN_FALLBACK_MESSAGE))
            }
        };
        Some(settlement)
    }

    fn failed(&mut self, text: String) -> Settlement {
        Settlement {
            outcome: Outcome::Failed,
            ticket: self.status.error(text),
            follow_ups: Vec::new(),
        }
    }

    /// Publishes an error raised by a follow-up (token write, redirect).
    pub fn report_error(&mut self, text: impl Into<String>) -> ExpiryTicket {
        self.status.error(text)
    }

    /// Tears the form down to empty: values, status and any in-flight
    /// submission (whose result will be ignored).
    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.status.clear();
        self.submission.abandon();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::{AuthError, AuthErrorKind};
    use crate::status::StatusKind;

    fn filled() -> LoginForm {
        let mut form = LoginForm::default();
        form.set_field(LoginField::Email, "a@b.com".to_string());
        form.set_field(LoginField::Password, "Valid1$pw".to_string());
        form
    }

    fn proceed(form: &mut LoginForm) -> (SubmissionId, LoginRequest) {
        match form.begin_submit() {
            SubmitDecision::Proceed { id, request } => (id, request),
            other => panic!("expected Proceed, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_has_no_client_side_gate() {
        let mut form = LoginForm::default();
        let (_, request) = proceed(&mut form);
        assert_eq!(request.email, "");
        assert!(form.status().current().is_none());
    }

    #[test]
    fn test_busy_blocks_second_submit() {
        let mut form = filled();
        let (id, request) = proceed(&mut form);
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.password, "Valid1$pw");
        assert!(form.is_busy());
        assert_eq!(form.phase(), SubmitPhase::Submitting(id));
        assert_eq!(form.begin_submit(), SubmitDecision::Busy);
    }

    #[test]
    fn test_success_stores_token_once_and_schedules_redirect() {
        let mut form = filled();
        let (id, _) = proceed(&mut form);

        let settlement = form
            .settle(
                id,
                Ok(LoginResponse {
                    token: "abc".to_string(),
                }),
            )
            .unwrap();

        assert_eq!(settlement.outcome, Outcome::Success);
        let stores: Vec<_> = settlement
            .follow_ups
            .iter()
            .filter_map(|f| match f {
                FollowUp::StoreToken(t) => Some(t.as_str()),
                FollowUp::Redirect(_) => None,
            })
            .collect();
        assert_eq!(stores, ["abc"]);
        let redirects: Vec<_> = settlement
            .follow_ups
            .iter()
            .filter_map(|f| match f {
                FollowUp::Redirect(r) => Some(r),
                FollowUp::StoreToken(_) => None,
            })
            .collect();
        assert_eq!(redirects.len(), 1);
        assert_eq!(redirects[0].delay, Duration::from_millis(1500));

        assert!(!form.is_busy());
        let status = form.status().current().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, LOGIN_SUCCESS_MESSAGE);
    }

    #[test]
    fn test_server_message_shown_on_failure() {
        let mut form = filled();
        let (id, _) = proceed(&mut form);
        let err = AuthError::http_status(401, r#"{"message":"Invalid credentials"}"#);

        let settlement = form.settle(id, Err(err)).unwrap();

        assert_eq!(settlement.outcome, Outcome::Failed);
        assert!(settlement.follow_ups.is_empty());
        assert!(!form.is_busy());
        assert_eq!(form.status().current().unwrap().text, "Invalid credentials");
        // Values survive a failure so the user can retry.
        assert_eq!(form.value(LoginField::Email), "a@b.com");
    }

    #[test]
    fn test_transport_failure_uses_fallback() {
        let mut form = filled();
        let (id, _) = proceed(&mut form);
        let err = AuthError::new(AuthErrorKind::Connect, "Connection failed");
        form.settle(id, Err(err)).unwrap();
        let status = form.status().current().unwrap();
        assert!(status.is_error());
        assert_eq!(status.text, LOGIN_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_empty_token_is_failure() {
        let mut form = filled();
        let (id, _) = proceed(&mut form);
        let settlement = form
            .settle(
                id,
                Ok(LoginResponse {
                    token: String::new(),
                }),
            )
            .unwrap();
        assert_eq!(settlement.outcome, Outcome::Failed);
        assert!(settlement.follow_ups.is_empty());
    }

    #[test]
    fn test_result_after_reset_is_ignored() {
        let mut form = filled();
        let (id, _) = proceed(&mut form);
        form.reset();
        assert!(!form.is_busy());
        assert_eq!(form.value(LoginField::Email), "");

        let late = form.settle(
            id,
            Ok(LoginResponse {
                token: "abc".to_string(),
            }),
        );
        assert!(late.is_none());
        assert!(form.status().current().is_none());
    }

    #[test]
    fn test_message_ttl_follows_settings() {
        let mut form = LoginForm::new(&FormSettings {
            message_ttl: Duration::from_millis(100),
            ..FormSettings::default()
        });
        let (id, _) = proceed(&mut form);
        let settlement = form
            .settle(id, Err(AuthError::parse("bad body")))
            .unwrap();
        assert_eq!(settlement.ticket.after, Duration::from_millis(100));
        assert!(form.expire_status(settlement.ticket));
    }

    #[test]
    fn test_debug_hides_password() {
        let form = filled();
        assert!(!format!("{form:?}").contains("Valid1$pw"));
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(LoginField::Email.next(), LoginField::Password);
        assert_eq!(LoginField::Password.next(), LoginField::Email);
        assert_eq!(LoginField::Email.prev(), LoginField::Password);
        assert!(LoginField::Password.is_secret());
    }
}
