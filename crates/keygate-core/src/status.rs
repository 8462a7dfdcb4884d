//! Single-slot transient status message.
//!
//! Publishing replaces whatever is shown (last write wins) and hands back an
//! [`ExpiryTicket`]. Whoever owns the clock sleeps for `ticket.after` and then
//! calls [`StatusSlot::expire`]. Expiry only clears the message that issued the
//! ticket: every publish or clear bumps the generation, so a ticket from a
//! superseded message is a no-op.

use std::time::Duration;

/// Default lifetime of a status message.
pub const DEFAULT_MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    generation: u64,
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Permission to clear one specific message once its lifetime elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryTicket {
    pub generation: u64,
    pub after: Duration,
}

#[derive(Debug, Clone)]
pub struct StatusSlot {
    current: Option<StatusMessage>,
    generation: u64,
    ttl: Duration,
}

impl Default for StatusSlot {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TTL)
    }
}

impl StatusSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            generation: 0,
            ttl,
        }
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn kind(&self) -> Option<StatusKind> {
        self.current.as_ref().map(|m| m.kind)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces the current message and arms a fresh expiry ticket.
    pub fn publish(&mut self, kind: StatusKind, text: impl Into<String>) -> ExpiryTicket {
        self.generation = self.generation.wrapping_add(1);
        self.current = Some(StatusMessage {
            kind,
            text: text.into(),
            generation: self.generation,
        });
        ExpiryTicket {
            generation: self.generation,
            after: self.ttl,
        }
    }

    pub fn success(&mut self, text: impl Into<String>) -> ExpiryTicket {
        self.publish(StatusKind::Success, text)
    }

    pub fn error(&mut self, text: impl Into<String>) -> ExpiryTicket {
        self.publish(StatusKind::Error, text)
    }

    /// Clears the message if it is still the one that issued `ticket`.
    ///
    /// Returns whether anything was cleared.
    pub fn expire(&mut self, ticket: ExpiryTicket) -> bool {
        let still_current = self
            .current
            .as_ref()
            .is_some_and(|m| m.generation == ticket.generation);
        if still_current {
            self.current = None;
        }
        still_current
    }

    /// Drops the current message and invalidates every outstanding ticket.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_replaces_current() {
        let mut slot = StatusSlot::default();
        slot.error("first");
        slot.success("second");
        let current = slot.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.kind, StatusKind::Success);
    }

    #[test]
    fn test_ticket_carries_ttl() {
        let mut slot = StatusSlot::new(Duration::from_millis(250));
        let ticket = slot.error("oops");
        assert_eq!(ticket.after, Duration::from_millis(250));
        assert_eq!(DEFAULT_MESSAGE_TTL, Duration::from_secs(5));
    }

    #[test]
    fn test_own_ticket_clears() {
        let mut slot = StatusSlot::default();
        let ticket = slot.success("done");
        assert!(slot.expire(ticket));
        assert!(slot.current().is_none());
        // Second firing is harmless.
        assert!(!slot.expire(ticket));
    }

    #[test]
    fn test_stale_ticket_does_not_clear_newer_message() {
        let mut slot = StatusSlot::default();
        // T: first message, T+1s: superseded.
        let first = slot.error("first");
        let second = slot.success("second");

        // T+5s: the first timer fires and must not blank the slot.
        assert!(!slot.expire(first));
        assert_eq!(slot.current().unwrap().text, "second");

        // T+6s: the second message's own timer clears it.
        assert!(slot.expire(second));
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_republishing_same_text_still_supersedes() {
        let mut slot = StatusSlot::default();
        let first = slot.error("same");
        let second = slot.error("same");
        assert!(!slot.expire(first));
        assert!(slot.current().is_some());
        assert!(slot.expire(second));
    }

    #[test]
    fn test_clear_invalidates_outstanding_tickets() {
        let mut slot = StatusSlot::default();
        let ticket = slot.error("bye");
        slot.clear();
        assert!(slot.current().is_none());
        let next = slot.success("hello");
        assert!(!slot.expire(ticket));
        assert!(slot.expire(next));
    }
}
