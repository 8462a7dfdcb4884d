//! Registration form controller.
//!
//! Fields validate on every change and on blur. Submit re-runs every
//! validator against the current values regardless of what the per-field
//! errors say, so a field the user never touched still gates the request.

use std::fmt;

use super::FormSettings;
use super::submission::{
    Outcome, Settlement, Submission, SubmissionId, SubmitDecision, SubmitPhase,
};
use crate::api::{AuthResult, RegisterRequest, RegisterResponse};
use crate::criteria::PasswordCriteria;
use crate::status::{ExpiryTicket, StatusSlot};
use crate::validation::{
    FieldResult, ValidationError, validate_email, validate_password, validate_username,
};

pub const REGISTER_INVALID_MESSAGE: &str = "Please fix the errors before submitting.";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";
/// Shown when the server accepts the registration without saying anything.
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Username,
    Email,
    Password,
}

impl RegisterField {
    pub const ALL: [RegisterField; 3] = [
        RegisterField::Username,
        RegisterField::Email,
        RegisterField::Password,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegisterField::Username => "Username",
            RegisterField::Email => "Email",
            RegisterField::Password => "Password",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, RegisterField::Password)
    }

    pub fn next(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Username,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RegisterField::Username => RegisterField::Password,
            RegisterField::Email => RegisterField::Username,
            RegisterField::Password => RegisterField::Email,
        }
    }

    fn validate(self, value: &str) -> FieldResult {
        match self {
            RegisterField::Username => validate_username(value),
            RegisterField::Email => validate_email(value),
            RegisterField::Password => validate_password(value),
        }
    }
}

/// Current error per registration field (`None` = valid or not yet checked).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl FieldErrors {
    pub fn get(&self, field: RegisterField) -> Option<ValidationError> {
        match field {
            RegisterField::Username => self.username,
            RegisterField::Email => self.email,
            RegisterField::Password => self.password,
        }
    }

    fn set(&mut self, field: RegisterField, result: FieldResult) {
        let slot = match field {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
        };
        *slot = result.err();
    }

    pub fn is_clear(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    errors: FieldErrors,
    criteria: PasswordCriteria,
    submission: Submission,
    status: StatusSlot,
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("errors", &self.errors)
            .field("submission", &self.submission)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new(&FormSettings::default())
    }
}

impl RegisterForm {
    pub fn new(settings: &FormSettings) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            errors: FieldErrors::default(),
            criteria: PasswordCriteria::default(),
            submission: Submission::default(),
            status: StatusSlot::new(settings.message_ttl),
        }
    }

    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: RegisterField) -> Option<ValidationError> {
        self.errors.get(field)
    }

    /// Live checklist for the current password.
    pub fn criteria(&self) -> PasswordCriteria {
        self.criteria
    }

    /// Replaces a field value and revalidates that field.
    pub fn set_field(&mut self, field: RegisterField, value: String) {
        match field {
            RegisterField::Username => self.username = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => {
                self.criteria = PasswordCriteria::evaluate(&value);
                self.password = value;
            }
        }
        self.revalidate(field);
    }

    /// Focus left `field`; covers tabbing through without typing.
    pub fn blur(&mut self, field: RegisterField) {
        self.revalidate(field);
    }

    fn revalidate(&mut self, field: RegisterField) {
        let result = field.validate(self.value(field));
        self.errors.set(field, result);
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

    pub fn expire_status(&mut self, ticket: ExpiryTicket) -> bool {
        self.status.expire(ticket)
    }

    pub fn begin_submit(&mut self) -> SubmitDecision<RegisterRequest> {
        if self.is_busy() {
            return SubmitDecision::Busy;
        }

        for field in RegisterField::ALL {
            self.revalidate(field);
        }
        if !self.errors.is_clear() {
            tracing::debug!(errors = ?self.errors, "registration rejected by validation");
            return SubmitDecision::Rejected {
                ticket: self.status.error(REGISTER_INVALID_MESSAGE),
            };
        }

        match self.submission.begin() {
            Some(id) => {
                tracing::info!(submission = id.0, "registration submission started");
                SubmitDecision::Proceed {
                    id,
                    request: RegisterRequest {
                        username: self.username.clone(),
                        email: self.email.clone(),
                        password: self.password.clone(),
                    },
                }
            }
            None => SubmitDecision::Busy,
        }
    }

    /// Applies the outcome of submission `id`; `None` for stale results.
    pub fn settle(
        &mut self,
        id: SubmissionId,
        result: AuthResult<RegisterResponse>,
    ) -> Option<Settlement> {
        if !self.submission.finish_if_active(id) {
            tracing::debug!(submission = id.0, "ignoring stale registration result");
            return None;
        }

        let settlement = match result {
            Ok(resp) => {
                tracing::info!(submission = id.0, "registration succeeded");
                let text = if resp.message.trim().is_empty() {
                    REGISTER_SUCCESS_MESSAGE.to_string()
                } else {
                    resp.message
                };
                self.clear_fields();
                Settlement {
                    outcome: Outcome::Success,
                    ticket: self.status.success(text),
                    follow_ups: Vec::new(),
                }
            }
            Err(err) => {
                tracing::warn!(submission = id.0, kind = %err.kind, error = %err, "registration failed");
                Settlement {
                    outcome: Outcome::Failed,
                    ticket: self.status.error(err.user_message(REGISTER_FALLBACK_MESSAGE)),
                    follow_ups: Vec::new(),
                }
            }
        };
        Some(settlement)
    }

    fn clear_fields(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.errors = FieldErrors::default();
        self.criteria = PasswordCriteria::default();
    }

    /// Tears the form down: values, errors, status, in-flight submission.
    pub fn reset(&mut self) {
        self.clear_fields();
        self.status.clear();
        self.submission.abandon();
    }
}
