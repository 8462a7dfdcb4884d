//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never performs I/O or spawns tasks itself.

use std::fmt;

use keygate_core::api::{LoginRequest, RegisterRequest};
use keygate_core::forms::{FormKind, ScheduledRedirect, SubmissionId};
use keygate_core::status::ExpiryTicket;
use tokio_util::sync::CancellationToken;

pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send the login request; answer with `UiEvent::LoginSettled { id, .. }`.
    SubmitLogin {
        id: SubmissionId,
        request: LoginRequest,
    },

    /// Send the registration request; answer with `UiEvent::RegisterSettled`.
    SubmitRegister {
        id: SubmissionId,
        request: RegisterRequest,
    },

    /// Persist the freshly issued token.
    StoreToken { token: String },

    /// Sleep `ticket.after`, then emit `UiEvent::StatusExpired`.
    ScheduleStatusExpiry {
        form: FormKind,
        ticket: ExpiryTicket,
    },

    /// Navigate to `redirect.url` after `redirect.delay`, unless `cancel`
    /// fires first; answer with `UiEvent::Redirected { id, .. }`.
    ScheduleRedirect {
        id: SubmissionId,
        redirect: ScheduledRedirect,
        cancel: CancellationToken,
    },
}

impl fmt::Debug for UiEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiEffect::Quit => f.write_str("Quit"),
            UiEffect::SubmitLogin { id, request } => f
                .debug_struct("SubmitLogin")
                .field("id", id)
                .field("request", request)
                .finish(),
            UiEffect::SubmitRegister { id, request } => f
                .debug_struct("SubmitRegister")
                .field("id", id)
                .field("request", request)
                .finish(),
            UiEffect::StoreToken { .. } => f.write_str("StoreToken { token: <redacted> }"),
            UiEffect::ScheduleStatusExpiry { form, ticket } => f
                .debug_struct("ScheduleStatusExpiry")
                .field("form", form)
                .field("ticket", ticket)
                .finish(),
            UiEffect::ScheduleRedirect { id, redirect, .. } => f
                .debug_struct("ScheduleRedirect")
                .field("id", id)
                .field("redirect", redirect)
                .finish_non_exhaustive(),
        }
    }
}
