//! Chat session state machine
//!
//! The session is an explicit state record: the transcript plus a status
//! that is `Idle` or `Sending` (with an `Error` display state for failed
//! round trips). A round trip moves through
//! `Idle -> begin -> Sending -> complete/fail -> Idle/Error`.
//!
//! Only one request may be in flight at a time: `begin` refuses to start a
//! round trip while another is pending, so replies always land in send order.

use crate::transcript::{Message, Transcript};

/// Status of the session with respect to the chat service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No request in flight, ready to submit
    Idle,
    /// A round trip is outstanding; submission is disabled
    Sending,
    /// The last round trip failed. Display-only: the transcript keeps the
    /// user message and the draft is not cleared.
    Error(String),
}

impl SessionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, SessionStatus::Sending)
    }
}

/// Conversation state: the transcript and the round-trip status
#[derive(Debug)]
pub struct Session {
    transcript: Transcript,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            status: SessionStatus::Idle,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Seed a fresh transcript with a local greeting (no round trip)
    pub fn greet(&mut self, text: impl Into<String>) {
        if self.transcript.is_empty() {
            self.transcript.push(Message::bot(text));
        }
    }

    /// Start a round trip for the given draft.
    ///
    /// Empty drafts are a no-op, as is submitting while a request is already
    /// in flight. On success the user message is appended to the transcript
    /// immediately, before any network activity resolves.
    ///
    /// Returns `true` if the caller should issue the request.
    pub fn begin(&mut self, draft: &str) -> bool {
        if draft.is_empty() {
            return false;
        }
        if self.status.is_sending() {
            tracing::debug!("submit ignored: round trip already in flight");
            return false;
        }
        self.transcript.push(Message::user(draft));
        self.status = SessionStatus::Sending;
        true
    }

    /// Record a successful reply, appending the bot message.
    pub fn complete(&mut self, reply: impl Into<String>) {
        self.transcript.push(Message::bot(reply));
        self.status = SessionStatus::Idle;
    }

    /// Record a failed round trip. The user message stays in the transcript.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = SessionStatus::Error(error.into());
    }

    /// Dismiss an error banner, returning to `Idle`
    pub fn clear_error(&mut self) {
        if matches!(self.status, SessionStatus::Error(_)) {
            self.status = SessionStatus::Idle;
        }
    }

    /// Reset the visible transcript (Ctrl+L)
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Sender;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_begin_appends_user_message_before_resolution() {
        let mut session = Session::new();

        assert!(session.begin("I feel anxious"));

        // Visible immediately, while the round trip is still outstanding
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().messages()[0].sender, Sender::User);
        assert_eq!(session.transcript().messages()[0].text, "I feel anxious");
        assert_eq!(*session.status(), SessionStatus::Sending);
    }

    #[test]
    fn test_empty_draft_is_a_noop() {
        let mut session = Session::new();

        assert!(!session.begin(""));

        assert!(session.transcript().is_empty());
        assert_eq!(*session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_complete_appends_bot_message_after_user() {
        let mut session = Session::new();
        session.begin("I feel anxious");
        session.complete("Tell me more.");

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "I feel anxious");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, "Tell me more.");
        assert_eq!(*session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_submit_disabled_while_sending() {
        let mut session = Session::new();
        assert!(session.begin("a"));

        // Second submit before the first resolves is refused
        assert!(!session.begin("b"));
        assert_eq!(session.transcript().len(), 1);

        session.complete("reply to a");
        assert!(session.begin("b"));
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_failure_keeps_user_message() {
        let mut session = Session::new();
        session.begin("hello");
        session.fail("connection refused");

        // No rollback of the already-appended user message
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().messages()[0].sender, Sender::User);
        assert_eq!(
            *session.status(),
            SessionStatus::Error("connection refused".to_string())
        );

        // Error is a display state only; submission works again afterwards
        session.clear_error();
        assert!(session.begin("hello again"));
    }

    #[test]
    fn test_clear_error_only_affects_error_state() {
        let mut session = Session::new();
        session.begin("hello");

        session.clear_error();
        assert_eq!(*session.status(), SessionStatus::Sending);
    }
}
