//! Transient toast notifications for mutating-action outcomes

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::time::{Duration, Instant};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// A mutating action succeeded
    Success,
    /// A mutating action failed
    Error,
}

/// One transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    /// Message shown to the user
    pub message: String,
    /// Severity, which drives the color
    pub kind: ToastKind,
    expires_at: Instant,
}

/// Stack of live toasts, newest last
#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    ttl: Duration,
}

impl Toasts {
    /// Create a stack whose entries live for `ttl`
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    /// Push a success notification
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastKind::Success);
    }

    /// Push an error notification
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastKind::Error);
    }

    fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.items.push(Toast {
            message: message.into(),
            kind,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Drop expired entries; call once per tick
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.items.retain(|toast| toast.expires_at > now);
    }

    /// Live entries, oldest first
    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Draw the stack in the top-right corner of `area`
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        for (index, toast) in self.items.iter().rev().enumerate() {
            let width = (toast.message.len() as u16 + 4).min(area.width);
            let y = area.y + (index as u16) * 3;
            if y + 3 > area.y + area.height {
                break;
            }
            let rect = Rect::new(area.x + area.width - width, y, width, 3);
            let color = match toast.kind {
                ToastKind::Success => Color::Green,
                ToastKind::Error => Color::Red,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(toast.message.clone())
                    .style(Style::default().fg(color))
                    .block(Block::default().borders(Borders::ALL)),
                rect,
            );
        }
    }
}
