//! Minimal single-line text input for the login form

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Single-line text field
#[derive(Debug, Default)]
pub struct TextInput {
    label: String,
    value: String,
    masked: bool,
}

impl TextInput {
    /// Create an input with a label shown in front of the value
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            masked: false,
        }
    }

    /// Render the value as bullets (for passwords)
    #[must_use]
    pub const fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Current contents
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the contents
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Clear the contents
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Apply a key press; returns true when the key was consumed
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// Draw the field; `focused` adds the cursor affordance
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, focused: bool) {
        let shown = if self.masked {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        let cursor = if focused { "_" } else { "" };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), label_style),
            Span::raw(shown),
            Span::raw(cursor),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
