//! Form state controllers and the submission state machine.
//!
//! Each form instance owns its field values, per-field errors, busy flag and
//! status slot; nothing is shared between instances.
//!
//! ## Submission
//!
//! `Idle → Validating → Submitting → (Success | Failed) → Idle`
//!
//! Validating happens synchronously inside `begin_submit`, which either
//! rejects (back to Idle with an error message), reports `Busy`, or hands
//! back the request to send together with a [`SubmissionId`]. The caller
//! performs the HTTP call and feeds the result to `settle`, which clears the
//! busy flag on every path and publishes the outcome.

mod login;
mod register;
mod submission;

use std::time::Duration;

pub use login::{LOGIN_FALLBACK_MESSAGE, LOGIN_SUCCESS_MESSAGE, LoginField, LoginForm};
pub use register::{
    FieldErrors, REGISTER_FALLBACK_MESSAGE, REGISTER_INVALID_MESSAGE, REGISTER_SUCCESS_MESSAGE,
    RegisterField, RegisterForm,
};
pub use submission::{
    FollowUp, Outcome, ScheduledRedirect, Settlement, SubmissionId, SubmissionSeq, SubmitDecision,
    SubmitPhase,
};

use crate::config::Config;

/// Timing and redirect settings shared by both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Lifetime of each status message.
    pub message_ttl: Duration,
    /// Where to navigate after a successful login.
    pub redirect_url: String,
    /// Delay before that navigation.
    pub redirect_delay: Duration,
}

impl Default for FormSettings {
    fn default() -> Self {
        Config::default().form_settings()
    }
}

/// Which form a message or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
}
