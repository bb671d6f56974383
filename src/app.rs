//! Application state and event loop
//!
//! The terminal is owned here: raw mode + alternate screen around a ratatui
//! `Terminal`, a key map from events to actions, and the round-trip driver
//! that keeps the UI live while a request is outstanding.

use crate::client::ChatClient;
use crate::config::Config;
use crate::session::Session;
use crate::ui::{ChatView, ChatViewWidget, InputBox, StatusBar};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

const APP_NAME: &str = "aura";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const MIN_FRAME_TIME: Duration = Duration::from_millis(16);
const PAGE_SCROLL_LINES: usize = 10;
/// Slice length for awaiting the in-flight request between event drains
const REQUEST_POLL_INTERVAL: Duration = Duration::from_millis(50);

const GREETING: &str = "Hi, I'm Aura. How are you feeling today?";

/// Input modes determine which keybindings are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    /// Ready for a new submission
    Editing,
    /// A round trip is in flight; editing works but Enter is disabled
    Sending,
}

/// Actions that can be triggered by key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    InsertChar(char),
    DeleteBack,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Submit,
    ClearInput,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ClearTranscript,
    Quit,
}

/// Map a key event to an action based on the current input mode
fn map_key(mode: InputMode, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('l') => Some(Action::ClearTranscript),
            _ => None,
        };
    }

    match key.code {
        // Submission is disabled while a round trip is outstanding
        KeyCode::Enter => match mode {
            InputMode::Editing => Some(Action::Submit),
            InputMode::Sending => None,
        },
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        KeyCode::Backspace => Some(Action::DeleteBack),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Esc => Some(Action::ClearInput),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        _ => None,
    }
}

/// Application state
pub struct App {
    config: Config,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: Session,
    chat: ChatView,
    input: InputBox,
    client: ChatClient,
    /// Draft accepted by the session, waiting for its request to be issued
    pending: Option<String>,
    should_quit: bool,
    /// Last render time for frame rate limiting
    last_render: Instant,
}

impl App {
    /// Create a new application
    pub fn new(config: Config) -> Result<Self> {
        let client = ChatClient::new(&config.chat.endpoint, config.chat.timeout())
            .context("Failed to create HTTP client")?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            crossterm::terminal::SetTitle(format!("{} v{}", APP_NAME, APP_VERSION)),
        )
        .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            config,
            terminal,
            session: Session::new(),
            chat: ChatView::new(),
            input: InputBox::new(),
            client,
            pending: None,
            should_quit: false,
            last_render: Instant::now(),
        })
    }

    /// Run the main event loop - purely event-driven rendering
    pub async fn run(&mut self) -> Result<()> {
        self.session.greet(GREETING);
        self.draw()?;

        loop {
            if self.should_quit {
                break;
            }

            // Issue the request for an accepted submission
            if let Some(content) = self.pending.take() {
                self.round_trip(content).await?;
                continue;
            }

            // Block until we get an event - no polling when idle
            if event::poll(Duration::from_secs(60))? {
                let needs_redraw = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = map_key(InputMode::Editing, key) {
                            self.handle_action(action);
                        }
                        true
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse_event(mouse);
                        true
                    }
                    Event::Resize(_, _) => true,
                    _ => false,
                };

                if needs_redraw {
                    self.draw()?;
                }
            }
        }

        self.cleanup()
    }

    /// Drive one round trip to completion while keeping the UI interactive.
    ///
    /// The pending response is awaited in short slices; between slices,
    /// terminal events are drained so the user can keep typing and scrolling.
    /// Only one request is ever in flight (the session refuses a second
    /// submit), so replies land in send order.
    async fn round_trip(&mut self, content: String) -> Result<()> {
        self.chat.enable_auto_scroll();
        self.draw()?;

        let client = self.client.clone();
        let request = client.send(&content);
        tokio::pin!(request);

        loop {
            match tokio::time::timeout(REQUEST_POLL_INTERVAL, &mut request).await {
                Ok(Ok(reply)) => {
                    // Draft is cleared only on the success path
                    self.session.complete(reply);
                    self.input.clear();
                    break;
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "chat round trip failed");
                    self.session.fail(e.to_string());
                    break;
                }
                Err(_) => {
                    // Still in flight: drain input so editing stays responsive
                    while event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                if let Some(action) = map_key(InputMode::Sending, key) {
                                    self.handle_action(action);
                                }
                            }
                            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                            _ => {}
                        }
                    }
                    self.draw_throttled()?;

                    if self.should_quit {
                        // Dropping the future abandons the request
                        return Ok(());
                    }
                }
            }
        }

        self.chat.enable_auto_scroll();
        self.draw()?;
        Ok(())
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) {
        // Any input dismisses the error banner
        self.session.clear_error();

        match action {
            Action::InsertChar(c) => self.input.insert_char(c),
            Action::DeleteBack => self.input.delete_char(),
            Action::DeleteForward => self.input.delete_char_forward(),
            Action::CursorLeft => self.input.move_cursor_left(),
            Action::CursorRight => self.input.move_cursor_right(),
            Action::CursorHome => self.input.move_cursor_start(),
            Action::CursorEnd => self.input.move_cursor_end(),
            Action::Submit => {
                // Empty drafts and in-flight round trips are both refused
                if self.session.begin(self.input.content()) {
                    self.pending = Some(self.input.content().to_string());
                }
            }
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                }
            }
            Action::ScrollUp => self.chat.scroll_up(),
            Action::ScrollDown => self.chat.scroll_down(),
            Action::PageUp => self.chat.page_up(PAGE_SCROLL_LINES),
            Action::PageDown => self.chat.page_down(PAGE_SCROLL_LINES),
            Action::ClearTranscript => self.session.clear_transcript(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Handle mouse events
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.chat.scroll_up(),
            MouseEventKind::ScrollDown => self.chat.scroll_down(),
            _ => {}
        }
    }

    /// Draw the UI
    fn draw(&mut self) -> Result<()> {
        self.last_render = Instant::now();

        let size = self.terminal.size()?;
        let input_height = self
            .input
            .required_height(size.width)
            .min(size.height / 2)
            .max(3);

        let session = &self.session;
        let input = &self.input;
        let config = &self.config;
        let chat = &mut self.chat;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(3),               // Chat area (minimum)
                    Constraint::Length(input_height), // Input area (dynamic)
                    Constraint::Length(1),            // Status bar
                ])
                .split(frame.area());

            frame.render_stateful_widget(
                ChatViewWidget::new(session.transcript(), config.ui.show_timestamps),
                chunks[0],
                chat,
            );
            frame.render_widget(input.widget(), chunks[1]);
            frame.render_widget(
                StatusBar::new(APP_NAME, APP_VERSION, &config.chat.endpoint, session.status()),
                chunks[2],
            );
        })?;

        Ok(())
    }

    /// Draw with frame rate limiting - skips if called too frequently
    fn draw_throttled(&mut self) -> Result<()> {
        if self.last_render.elapsed() >= MIN_FRAME_TIME {
            self.draw()?;
        }
        Ok(())
    }

    /// Cleanup terminal
    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
        )
        .context("Failed to cleanup terminal")?;
        self.terminal
            .show_cursor()
            .context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
