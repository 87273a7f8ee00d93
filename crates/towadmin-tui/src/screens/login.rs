//! Login and password-reset screen
//!
//! Validates input locally before any request goes out; the submit button
//! stays inert while a request is in flight.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use towadmin_client::ApiClient;
use towadmin_core::types::{LoginRequest, ResetPasswordRequest};
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::components::TextInput;
use crate::msg::AppMsg;

/// Which form the screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    ResetPassword,
}

/// The unauthenticated entry screen
#[derive(Debug)]
pub struct LoginScreen {
    email: TextInput,
    password: TextInput,
    focus: usize,
    mode: Mode,
    busy: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    /// Create the screen in login mode
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: TextInput::new("Email"),
            password: TextInput::new("Password").masked(),
            focus: 0,
            mode: Mode::Login,
            busy: false,
            error: None,
            notice: None,
        }
    }

    /// Whether a login or reset request is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Show a failure from a finished request and accept input again
    pub fn on_error(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.notice = None;
        self.error = Some(message.into());
    }

    /// Show the reset-sent notice and return to the login form
    pub fn on_reset_sent(&mut self) {
        self.busy = false;
        self.error = None;
        self.mode = Mode::Login;
        self.notice = Some("Password reset email sent".to_string());
    }

    /// Route a key press; may spawn a request on `handle`
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        api: &ApiClient,
        handle: &Handle,
        tx: &UnboundedSender<AppMsg>,
    ) {
        if self.busy {
            return;
        }

        // Ctrl-R toggles between login and password reset
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if event.code == KeyCode::Char('r') {
                self.mode = match self.mode {
                    Mode::Login => Mode::ResetPassword,
                    Mode::ResetPassword => Mode::Login,
                };
                self.focus = 0;
                self.error = None;
            }
            return;
        }

        match event.code {
            KeyCode::Tab | KeyCode::Down => self.cycle_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.cycle_focus(usize::MAX),
            KeyCode::Enter => self.submit(api, handle, tx),
            _ => {
                let consumed = if self.focus == 0 {
                    self.email.handle_key(event)
                } else {
                    self.password.handle_key(event)
                };
                if consumed {
                    self.error = None;
                }
            }
        }
    }

    fn field_count(&self) -> usize {
        match self.mode {
            Mode::Login => 2,
            Mode::ResetPassword => 1,
        }
    }

    fn cycle_focus(&mut self, step: usize) {
        let count = self.field_count();
        self.focus = self.focus.wrapping_add(step) % count;
    }

    fn submit(&mut self, api: &ApiClient, handle: &Handle, tx: &UnboundedSender<AppMsg>) {
        self.notice = None;
        match self.mode {
            Mode::Login => {
                let request = LoginRequest {
                    email: self.email.value().trim().to_string(),
                    password: self.password.value().to_string(),
                };
                if let Err(errors) = request.validate() {
                    self.error = Some(first_error(&errors));
                    return;
                }
                info!(email = %request.email, "submitting login");
                self.busy = true;
                self.error = None;
                let api = api.clone();
                let tx = tx.clone();
                handle.spawn(async move {
                    let outcome = api.login(&request).await;
                    let _ = tx.send(AppMsg::LoginFinished(Box::new(outcome)));
                });
            }
            Mode::ResetPassword => {
                let request = ResetPasswordRequest {
                    email: self.email.value().trim().to_string(),
                };
                if let Err(errors) = request.validate() {
                    self.error = Some(first_error(&errors));
                    return;
                }
                self.busy = true;
                self.error = None;
                let api = api.clone();
                let tx = tx.clone();
                handle.spawn(async move {
                    let outcome = api.reset_password(&request).await;
                    let _ = tx.send(AppMsg::ResetPasswordFinished(outcome));
                });
            }
        }
    }

    /// Draw the form centered in `area`
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let width = 48_u16.min(area.width);
        let height = 10_u16.min(area.height);
        let form = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let title = match self.mode {
            Mode::Login => "Towadmin Login",
            Mode::ResetPassword => "Reset Password",
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(form);
        frame.render_widget(block, form);
        if inner.height < 6 {
            return;
        }

        let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);

        self.email.render(frame, row(0), self.focus == 0);
        if self.mode == Mode::Login {
            self.password.render(frame, row(1), self.focus == 1);
        }

        let status = if self.busy {
            Line::styled("Signing in...", Style::default().fg(Color::DarkGray))
        } else if let Some(error) = &self.error {
            Line::styled(error.clone(), Style::default().fg(Color::Red))
        } else if let Some(notice) = &self.notice {
            Line::styled(notice.clone(), Style::default().fg(Color::Green))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(status), row(3));

        let hint = match self.mode {
            Mode::Login => "Enter: sign in   Ctrl-R: reset password",
            Mode::ResetPassword => "Enter: send reset link   Ctrl-R: back",
        };
        frame.render_widget(
            Paragraph::new(Line::styled(
                hint,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            row(5),
        );
    }
}

/// First validation failure, formatted as "field: reason"
fn first_error(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .next()
        .map_or_else(
            || "invalid input".to_string(),
            |(field, failures)| {
                let reason = failures
                    .first()
                    .and_then(|f| f.message.as_ref())
                    .map_or_else(|| "is invalid".to_string(), ToString::to_string);
                format!("{field}: {reason}")
            },
        )
}
