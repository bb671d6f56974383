//! Chat view component
//!
//! Renders the transcript as a bottom-aligned, scrollable pane. Each message
//! gets a role header ("You" / "Aura") and word-wrapped body lines. While
//! auto-scroll is on the view sticks to the newest message; scrolling up
//! detaches it until the user returns to the bottom.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use textwrap::wrap;

use crate::transcript::{Message, Sender, Transcript};

/// Scroll state for the chat pane
#[derive(Debug)]
pub struct ChatView {
    /// Lines scrolled up from the bottom; 0 means pinned to the newest line
    scroll_offset: usize,
    auto_scroll: bool,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            auto_scroll: true,
        }
    }

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        if self.scroll_offset == 0 {
            self.auto_scroll = true;
        }
    }

    pub fn page_up(&mut self, lines: usize) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn page_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        if self.scroll_offset == 0 {
            self.auto_scroll = true;
        }
    }

    /// Re-pin the view to the newest message
    pub fn enable_auto_scroll(&mut self) {
        self.auto_scroll = true;
        self.scroll_offset = 0;
    }
}

/// Widget rendering a transcript with a [`ChatView`] scroll state
pub struct ChatViewWidget<'a> {
    transcript: &'a Transcript,
    show_timestamps: bool,
}

impl<'a> ChatViewWidget<'a> {
    pub fn new(transcript: &'a Transcript, show_timestamps: bool) -> Self {
        Self {
            transcript,
            show_timestamps,
        }
    }

    /// Render one message to lines (header + wrapped body + separator)
    fn message_lines(&self, message: &Message, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (name, name_style) = match message.sender {
            Sender::User => (
                "You",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Sender::Bot => (
                "Aura",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let mut header = vec![Span::styled(name, name_style)];
        if self.show_timestamps {
            header.push(Span::styled(
                format!(" ({})", message.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        let wrap_width = width.max(1) as usize;
        for wrapped in wrap(&message.text, wrap_width) {
            lines.push(Line::from(Span::raw(wrapped.into_owned())));
        }

        // Separator between messages
        lines.push(Line::default());

        lines
    }
}

impl StatefulWidget for ChatViewWidget<'_> {
    type State = ChatView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ChatView) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines: Vec<Line<'static>> = self
            .transcript
            .messages()
            .iter()
            .flat_map(|m| self.message_lines(m, area.width))
            .collect();

        let total = lines.len();
        let visible = area.height as usize;
        let max_offset = total.saturating_sub(visible);

        if state.auto_scroll {
            state.scroll_offset = 0;
        }
        state.scroll_offset = state.scroll_offset.min(max_offset);

        // Bottom-aligned window: skip everything above the visible slice
        let skip = max_offset - state.scroll_offset;
        let window: Vec<Line<'static>> = lines.into_iter().skip(skip).take(visible).collect();

        Paragraph::new(window).render(area, buf);
    }
}
