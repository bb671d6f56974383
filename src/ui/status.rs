//! Status bar component

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::session::SessionStatus;

/// Status bar widget: app identity, endpoint, and round-trip state
pub struct StatusBar<'a> {
    app_name: &'a str,
    version: &'a str,
    endpoint: &'a str,
    status: &'a SessionStatus,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        app_name: &'a str,
        version: &'a str,
        endpoint: &'a str,
        status: &'a SessionStatus,
    ) -> Self {
        Self {
            app_name,
            version,
            endpoint,
            status,
        }
    }

    fn indicator(&self) -> (&'static str, Color, &str) {
        match self.status {
            SessionStatus::Idle => ("●", Color::Green, "Ready"),
            SessionStatus::Sending => ("◐", Color::Yellow, "Sending..."),
            SessionStatus::Error(msg) => ("✗", Color::Red, msg.as_str()),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().bg(Color::DarkGray).fg(Color::White);
        buf.set_style(area, style);

        let (symbol, color, text) = self.indicator();

        let spans = vec![
            Span::styled(
                format!(" {} v{} ", self.app_name, self.version),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ "),
            Span::styled(
                format!("{} ", self.endpoint),
                Style::default().fg(Color::White),
            ),
            Span::raw("│ "),
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(text, Style::default().fg(color)),
        ];

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(status: &SessionStatus) -> String {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new("aura", "0.1.0", "http://localhost:8000/chat", status).render(area, &mut buf);

        (0..80).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_idle_status_line() {
        let line = rendered(&SessionStatus::Idle);
        assert!(line.contains("aura v0.1.0"));
        assert!(line.contains("http://localhost:8000/chat"));
        assert!(line.contains("Ready"));
    }

    #[test]
    fn test_sending_and_error_states() {
        assert!(rendered(&SessionStatus::Sending).contains("Sending..."));

        let error = SessionStatus::Error("connection refused".to_string());
        assert!(rendered(&error).contains("connection refused"));
    }
}
