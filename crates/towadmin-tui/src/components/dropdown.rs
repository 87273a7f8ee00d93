//! Filter dropdown selecting one option from a finite set
//!
//! Mouse events only reach the dropdown while it is open (the closed widget
//! keeps no hit regions), so a close fires exactly once per open session:
//! the terminal analogue of registering the outside-click listener on open
//! and deregistering it on close.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Stable identifier, matched against the current selection
    pub id: String,
    /// Text shown in the list
    pub title: String,
}

impl FilterOption {
    /// Create an option
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Interaction reported by the dropdown, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    /// An option was picked
    Selected(FilterOption),
    /// The dropdown closed (after a selection or an outside click)
    Closed,
}

/// Dropdown filter widget
#[derive(Debug, Default)]
pub struct FilterDropdown {
    options: Vec<FilterOption>,
    selected: Option<String>,
    open: bool,
    bounds: Option<Rect>,
    option_regions: Vec<(Rect, usize)>,
}

impl FilterDropdown {
    /// Create a dropdown over the given options
    #[must_use]
    pub fn new(options: Vec<FilterOption>) -> Self {
        Self {
            options,
            selected: None,
            open: false,
            bounds: None,
            option_regions: Vec::new(),
        }
    }

    /// Preselect an option by id
    #[must_use]
    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }

    /// Whether the list is currently shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The id of the currently selected option
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Open the list
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Toggle the list
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Draw the list as an overlay anchored at `anchor`
    ///
    /// Draws nothing while closed.
    pub fn render(&mut self, frame: &mut Frame<'_>, anchor: Rect) {
        self.option_regions.clear();
        if !self.open {
            self.bounds = None;
            return;
        }

        let width = self
            .options
            .iter()
            .map(|o| o.title.len() as u16 + 4)
            .max()
            .unwrap_or(10)
            .min(anchor.width.max(10));
        let height = (self.options.len() as u16 + 2).min(frame.area().height.saturating_sub(anchor.y));
        // keep the overlay inside the buffer even when the terminal is
        // narrower than the floor width
        let area = Rect::new(anchor.x, anchor.y, width, height).intersection(frame.area());

        frame.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line<'_>> = self
            .options
            .iter()
            .map(|option| {
                let marked = self.selected.as_deref() == Some(option.id.as_str());
                let prefix = if marked { "> " } else { "  " };
                let style = if marked {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::styled(format!("{prefix}{}", option.title), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        for (index, _) in self.options.iter().enumerate() {
            let y = inner.y + index as u16;
            if y < inner.y + inner.height {
                self.option_regions
                    .push((Rect::new(inner.x, y, inner.width, 1), index));
            }
        }
        self.bounds = Some(area);
    }

    /// Route a pointer-down event while open
    ///
    /// Returns `[Selected(option), Closed]` for an option click, `[Closed]`
    /// for a click outside the bounds, and nothing otherwise. The widget is
    /// inert while closed.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Vec<DropdownEvent> {
        if !self.open || event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(event.column, event.row);

        for (region, index) in &self.option_regions {
            if region.contains(position) {
                let option = self.options[*index].clone();
                self.selected = Some(option.id.clone());
                self.open = false;
                return vec![DropdownEvent::Selected(option), DropdownEvent::Closed];
            }
        }

        match self.bounds {
            Some(bounds) if bounds.contains(position) => Vec::new(),
            _ => {
                self.open = false;
                vec![DropdownEvent::Closed]
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn statuses() -> Vec<FilterOption> {
        vec![
            FilterOption::new("pending", "Pending"),
            FilterOption::new("accepted", "Accepted"),
            FilterOption::new("completed", "Completed"),
        ]
    }

    fn draw(dropdown: &mut FilterDropdown) -> String {
        let backend = TestBackend::new(40, 10);
        let mut terminal =
            Terminal::new(backend).unwrap_or_else(|e| panic!("terminal should build: {e}"));
        terminal
            .draw(|frame| dropdown.render(frame, Rect::new(2, 1, 20, 1)))
            .unwrap_or_else(|e| panic!("draw should succeed: {e}"));
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn renders_within_a_narrow_terminal() {
        let backend = TestBackend::new(8, 10);
        let mut terminal =
            Terminal::new(backend).unwrap_or_else(|e| panic!("terminal should build: {e}"));
        let mut dropdown = FilterDropdown::new(statuses());
        dropdown.open();
        terminal
            .draw(|frame| dropdown.render(frame, Rect::new(2, 1, 6, 1)))
            .unwrap_or_else(|e| panic!("draw should fit the buffer: {e}"));
        assert!(dropdown.is_open());
    }

    #[test]
    fn renders_nothing_while_closed() {
        let mut dropdown = FilterDropdown::new(statuses());
        let text = draw(&mut dropdown);
        assert!(!text.contains("Pending"));
    }

    #[test]
    fn renders_options_and_marks_selection_while_open() {
        let mut dropdown = FilterDropdown::new(statuses()).with_selected("accepted");
        dropdown.open();
        let text = draw(&mut dropdown);

        assert!(text.contains("Pending"));
        assert!(text.contains("> Accepted"));
        assert!(text.contains("  Completed"));
    }

    #[test]
    fn outside_click_closes_exactly_once_per_open_session() {
        let mut dropdown = FilterDropdown::new(statuses());
        dropdown.open();
        draw(&mut dropdown);

        let events = dropdown.handle_mouse(&click(35, 8));
        assert_eq!(events, vec![DropdownEvent::Closed]);
        assert!(!dropdown.is_open());

        // closed widget is inert: no second close, no leaked handling
        let events = dropdown.handle_mouse(&click(35, 8));
        assert!(events.is_empty());
    }

    #[test]
    fn selecting_an_option_emits_selected_before_closed() {
        let mut dropdown = FilterDropdown::new(statuses());
        dropdown.open();
        draw(&mut dropdown);

        // options start inside the border: anchor (2,1) -> inner row 2 is "Pending"
        let events = dropdown.handle_mouse(&click(4, 2));
        assert_eq!(
            events,
            vec![
                DropdownEvent::Selected(FilterOption::new("pending", "Pending")),
                DropdownEvent::Closed,
            ]
        );
        assert_eq!(dropdown.selected(), Some("pending"));
        assert!(!dropdown.is_open());
    }

    #[test]
    fn click_on_border_neither_selects_nor_closes() {
        let mut dropdown = FilterDropdown::new(statuses());
        dropdown.open();
        draw(&mut dropdown);

        // (2,1) is the top-left border corner: inside bounds, not an option
        let events = dropdown.handle_mouse(&click(2, 1));
        assert!(events.is_empty());
        assert!(dropdown.is_open());
    }
}
