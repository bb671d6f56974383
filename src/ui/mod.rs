//! UI components for the TUI

mod chat;
mod input;
mod status;

pub use chat::{ChatView, ChatViewWidget};
pub use input::{InputBox, InputBoxWidget};
pub use status::StatusBar;
