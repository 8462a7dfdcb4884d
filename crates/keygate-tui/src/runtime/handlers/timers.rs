//! Delayed handlers: status expiry and the post-login redirect.

use std::sync::Arc;

use keygate_core::forms::{FormKind, ScheduledRedirect, SubmissionId};
use keygate_core::status::ExpiryTicket;
use keygate_core::workflow::{Navigator, follow_redirect};

use crate::events::UiEvent;

/// Sleeps for the ticket's lifetime, then reports it expired. The reducer
/// decides whether the ticket still owns the message.
pub async fn status_expiry(form: FormKind, ticket: ExpiryTicket) -> UiEvent {
    tokio::time::sleep(ticket.after).await;
    UiEvent::StatusExpired { form, ticket }
}

pub async fn redirect(
    id: SubmissionId,
    redirect: ScheduledRedirect,
    navigator: Arc<dyn Navigator>,
) -> UiEvent {
    let result = follow_redirect(&redirect, navigator.as_ref())
        .await
        .map_err(|e| {
            tracing::warn!(url = %redirect.url, error = %format!("{e:#}"), "redirect failed");
            format!("{e:#}")
        });
    UiEvent::Redirected {
        id,
        url: redirect.url,
        result,
    }
}
