//! UI event types.
//!
//! All external inputs (terminal, HTTP results, timers) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async handlers send their result events straight to the runtime's inbox.
//! Each result carries the id or ticket it belongs to; the reducer drops any
//! that no longer match the form's current state.

use crossterm::event::Event as CrosstermEvent;
use keygate_core::api::{AuthResult, LoginResponse, RegisterResponse};
use keygate_core::forms::{FormKind, SubmissionId};
use keygate_core::status::ExpiryTicket;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (spinner animation).
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// The login request for submission `id` completed.
    LoginSettled {
        id: SubmissionId,
        result: AuthResult<LoginResponse>,
    },

    /// The registration request for submission `id` completed.
    RegisterSettled {
        id: SubmissionId,
        result: AuthResult<RegisterResponse>,
    },

    /// A status message lifetime elapsed.
    StatusExpired {
        form: FormKind,
        ticket: ExpiryTicket,
    },

    /// The token write finished.
    TokenStored { result: Result<(), String> },

    /// The post-login redirect for submission `id` ran.
    Redirected {
        id: SubmissionId,
        url: String,
        result: Result<(), String>,
    },
}
