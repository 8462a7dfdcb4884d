use std::fmt;
use std::time::Duration;

use crate::status::ExpiryTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub u64);

#[derive(Debug, Default, Clone)]
pub struct SubmissionSeq {
    next: u64,
}

impl SubmissionSeq {
    pub fn next_id(&mut self) -> SubmissionId {
        let id = SubmissionId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Where a form is in its submit cycle between events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting(SubmissionId),
}

/// Result of a submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision<R> {
    /// A submission is already in flight; nothing happened.
    Busy,
    /// Client-side validation failed; an error message was published.
    Rejected { ticket: ExpiryTicket },
    /// Send `request`, then call `settle` with `id`.
    Proceed { id: SubmissionId, request: R },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

/// Navigation to perform once `delay` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub url: String,
    pub delay: Duration,
}

/// Side effects the caller must carry out after a settlement.
#[derive(Clone, PartialEq, Eq)]
pub enum FollowUp {
    StoreToken(String),
    Redirect(ScheduledRedirect),
}

impl fmt::Debug for FollowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowUp::StoreToken(_) => f.write_str("StoreToken(<redacted>)"),
            FollowUp::Redirect(redirect) => f.debug_tuple("Redirect").field(redirect).finish(),
        }
    }
}

/// What happened when a submission settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    /// Expiry ticket for the status message just published.
    pub ticket: ExpiryTicket,
    pub follow_ups: Vec<FollowUp>,
}

/// Busy flag plus the id of the one submission allowed to settle.
#[derive(Debug, Default, Clone)]
pub(crate) struct Submission {
    phase: SubmitPhase,
    seq: SubmissionSeq,
}

impl Submission {
    pub(crate) fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub(crate) fn is_busy(&self) -> bool {
        matches!(self.phase, SubmitPhase::Submitting(_))
    }

    /// Marks a submission as started; `None` if one is already running.
    pub(crate) fn begin(&mut self) -> Option<SubmissionId> {
        if self.is_busy() {
            return None;
        }
        let id = self.seq.next_id();
        self.phase = SubmitPhase::Submitting(id);
        Some(id)
    }

    /// Returns to idle if `id` is the running submission.
    pub(crate) fn finish_if_active(&mut self, id: SubmissionId) -> bool {
        let ok = self.phase == SubmitPhase::Submitting(id);
        if ok {
            self.phase = SubmitPhase::Idle;
        }
        ok
    }

    /// Forgets any running submission; its result will be ignored.
    pub(crate) fn abandon(&mut self) {
        self.phase = SubmitPhase::Idle;
    }
}
