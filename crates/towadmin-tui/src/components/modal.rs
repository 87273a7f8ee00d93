//! Delete confirmation modal
//!
//! A full-overlay yes/no gate for destructive actions. The modal performs no
//! network call itself: the caller owns the request, flips `loading` while it
//! is in flight, and eventually closes the modal.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Interaction reported by the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// The destructive action was confirmed
    Confirmed,
    /// The modal was dismissed
    Cancelled,
}

/// Confirmation modal widget
#[derive(Debug, Default)]
pub struct ConfirmModal {
    item_name: String,
    loading: bool,
    confirm_region: Option<Rect>,
    cancel_region: Option<Rect>,
}

impl ConfirmModal {
    /// Create a modal asking to delete `item_name`
    #[must_use]
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            loading: false,
            confirm_region: None,
            cancel_region: None,
        }
    }

    /// The name shown in the prompt
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Flip the in-flight affordance
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the confirm request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Draw the overlay centered in `area`, blocking what is underneath
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let width = (self.item_name.len() as u16 + 20).max(30).min(area.width);
        let height = 7_u16.min(area.height);
        let modal = centered_rect(area, width, height);

        frame.render_widget(Clear, modal);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Confirm delete");
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let prompt = format!("Delete {}?", self.item_name);
        let confirm_label = if self.loading {
            "[ Deleting... ]"
        } else {
            "[ Delete ]"
        };
        let cancel_style = if self.loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let lines = vec![
            Line::from(prompt),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from(vec![
                Span::styled("[ Cancel ]", cancel_style),
                Span::raw("  "),
                Span::styled(
                    confirm_label,
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);

        // button hit regions on the fourth inner line
        let buttons_y = inner.y + 3;
        if buttons_y < inner.y + inner.height {
            let cancel_width = "[ Cancel ]".len() as u16;
            self.cancel_region = Some(Rect::new(inner.x, buttons_y, cancel_width, 1));
            self.confirm_region = Some(Rect::new(
                inner.x + cancel_width + 2,
                buttons_y,
                confirm_label.len() as u16,
                1,
            ));
        } else {
            self.cancel_region = None;
            self.confirm_region = None;
        }
    }

    /// Route a pointer-down event
    ///
    /// While loading, both buttons are inert: cancelling mid-request is not
    /// allowed and a second confirm would double-fire the request.
    #[must_use]
    pub fn handle_mouse(&self, event: &MouseEvent) -> Option<ModalEvent> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let position = Position::new(event.column, event.row);

        if !self.loading {
            if let Some(region) = self.cancel_region {
                if region.contains(position) {
                    return Some(ModalEvent::Cancelled);
                }
            }
            if let Some(region) = self.confirm_region {
                if region.contains(position) {
                    return Some(ModalEvent::Confirmed);
                }
            }
        }
        None
    }

    /// Route a key press: Enter confirms, `n` cancels
    ///
    /// Escape is deliberately not handled.
    #[must_use]
    pub fn handle_key(&self, event: &KeyEvent) -> Option<ModalEvent> {
        if self.loading {
            return None;
        }
        match event.code {
            KeyCode::Enter => Some(ModalEvent::Confirmed),
            KeyCode::Char('n') => Some(ModalEvent::Cancelled),
            _ => None,
        }
    }
}

/// Center a `width` x `height` rectangle inside `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
