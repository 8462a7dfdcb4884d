//! Feature modules: one per screen, plus the shared status line.
//!
//! Each screen feature follows the same split:
//! - `state.rs`: view state wrapping the core form controller
//! - `update.rs`: key handling and async result handling (returns effects)
//! - `render.rs`: pure rendering from state

pub mod login;
pub mod register;
pub mod status;

use keygate_core::forms::{FollowUp, FormKind, Settlement, SubmissionId, SubmitDecision};
use tokio_util::sync::CancellationToken;

use crate::effects::UiEffect;

/// Turns a submit decision into effects. `Busy` yields nothing.
pub(crate) fn decision_effects<R>(
    form: FormKind,
    decision: SubmitDecision<R>,
    submit: impl FnOnce(SubmissionId, R) -> UiEffect,
) -> Vec<UiEffect> {
    match decision {
        SubmitDecision::Busy => vec![],
        SubmitDecision::Rejected { ticket } => {
            vec![UiEffect::ScheduleStatusExpiry { form, ticket }]
        }
        SubmitDecision::Proceed { id, request } => vec![submit(id, request)],
    }
}

/// Tracks the one redirect a screen may still perform.
///
/// Navigation is armed per submission and disarmed when the screen is torn
/// down: the runtime stops waiting on the cancelled token, and a late
/// `Redirected` event for a disarmed id is ignored.
#[derive(Debug, Default)]
pub struct RedirectGuard {
    armed: Option<(SubmissionId, CancellationToken)>,
}

impl RedirectGuard {
    /// Arms navigation for `id`, cancelling whatever was armed before.
    pub fn arm(&mut self, id: SubmissionId) -> CancellationToken {
        self.disarm();
        let cancel = CancellationToken::new();
        self.armed = Some((id, cancel.clone()));
        cancel
    }

    /// Whether a redirect result for `id` still belongs to this screen.
    pub fn is_armed_for(&self, id: SubmissionId) -> bool {
        self.armed
            .as_ref()
            .is_some_and(|(armed, cancel)| *armed == id && !cancel.is_cancelled())
    }

    /// Consumes the guard for `id` once its redirect has run.
    pub fn complete(&mut self, id: SubmissionId) -> bool {
        if self.is_armed_for(id) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    pub fn disarm(&mut self) {
        if let Some((_, cancel)) = self.armed.take() {
            cancel.cancel();
        }
    }
}

/// Effects for a settled submission: the message timer, then follow-ups.
pub(crate) fn settlement_effects(
    form: FormKind,
    id: SubmissionId,
    settlement: Settlement,
    redirects: &mut RedirectGuard,
) -> Vec<UiEffect> {
    let mut effects = vec![UiEffect::ScheduleStatusExpiry {
        form,
        ticket: settlement.ticket,
    }];
    effects.extend(
        settlement
            .follow_ups
            .into_iter()
            .map(|follow_up| match follow_up {
                FollowUp::StoreToken(token) => UiEffect::StoreToken { token },
                FollowUp::Redirect(redirect) => UiEffect::ScheduleRedirect {
                    id,
                    redirect,
                    cancel: redirects.arm(id),
                },
            }),
    );
    effects
}
