//! Aura - a terminal chat client for the Aura student wellbeing assistant
//!
//! The client keeps an append-only transcript of the conversation, a draft
//! input line, and an explicit idle/sending status. Each submission issues
//! one JSON POST to the chat-reply service and appends the returned reply.
//! The service behind the endpoint is an external collaborator; this crate
//! only speaks the `{"message"}` / `{"reply"}` wire protocol.

pub mod app;
pub mod client;
pub mod config;
pub mod session;
pub mod transcript;
pub mod ui;

pub use client::{ChatClient, ClientError};
pub use config::Config;
pub use session::{Session, SessionStatus};
pub use transcript::{Message, Sender, Transcript};
