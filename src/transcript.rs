//! Core types for the chat transcript
//!
//! A Transcript is an append-only, ordered sequence of Messages. Entries are
//! never mutated, removed, or reordered after insertion; display order is
//! insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single message in the transcript, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message authored locally by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a message from a chat service reply
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The chat transcript - display log of all messages for UI rendering
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Insertion order is display order.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("I feel anxious"));
        transcript.push(Message::bot("Tell me more."));
        transcript.push(Message::user("It's exam season"));

        let senders: Vec<Sender> = transcript.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User]);
        assert_eq!(transcript.messages()[0].text, "I feel anxious");
        assert_eq!(transcript.messages()[1].text, "Tell me more.");
    }

    #[test]
    fn test_push_does_not_touch_existing_entries() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("first"));
        let before = (
            transcript.messages()[0].sender,
            transcript.messages()[0].text.clone(),
        );

        transcript.push(Message::bot("second"));

        assert_eq!(transcript.messages()[0].sender, before.0);
        assert_eq!(transcript.messages()[0].text, before.1);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("hello"));
        assert!(!transcript.is_empty());

        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
    }
}
