//! Column-schema driven data table with client-side pagination
//!
//! The table is a controlled component: it renders whatever page the caller
//! says is current and reports page-button and row clicks back as events; it
//! never owns pagination state itself.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Renderer for one cell: resolved value, whole row, row index within page
pub type CellRender = Arc<dyn Fn(Option<&Value>, &Value, usize) -> String + Send + Sync>;

/// Placeholder shown for null or unresolvable cell values
pub const CELL_PLACEHOLDER: &str = "-";

/// Declarative description of one table column
#[derive(Clone)]
pub struct Column {
    /// Header text; capitalized when rendered
    pub title: String,
    /// Dotted path into the row (`"profile.address.0.city"`)
    pub data_index: String,
    /// Unique key within a column set
    pub key: String,
    /// Optional custom renderer; absent means default formatting
    pub render: Option<CellRender>,
}

impl Column {
    /// Create a column rendering the raw value under `data_index`
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        data_index: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            data_index: data_index.into(),
            key: key.into(),
            render: None,
        }
    }

    /// Attach a custom cell renderer
    #[must_use]
    pub fn with_render(
        mut self,
        render: impl Fn(Option<&Value>, &Value, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("key", &self.key)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Caller-owned pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based
    pub current: usize,
    /// Rows per page
    pub page_size: usize,
    /// Total number of rows
    pub total: usize,
}

impl Pagination {
    /// Number of page buttons to offer
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    /// Bounds of the current page within a row list of length `len`
    ///
    /// The current page may point past the end (partial last page, or a
    /// shrunken data set); the bounds are clamped so the slice never panics.
    #[must_use]
    pub fn slice_bounds(&self, len: usize) -> (usize, usize) {
        let current = self.current.max(1);
        let start = (current - 1).saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        (start, end)
    }
}

/// Interaction reported by the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A page button was clicked: `(page, page_size)`
    PageChanged(usize, usize),
    /// A row was clicked, identified by its `id` field
    RowClicked(String),
}

/// Data table widget
///
/// `render` records the clickable regions of the frame it draws, so
/// `handle_mouse` must be fed events from the same layout pass.
#[derive(Debug, Default)]
pub struct DataTable {
    columns: Vec<Column>,
    row_clicks: bool,
    page_buttons: Vec<(Rect, usize)>,
    row_regions: Vec<(Rect, String)>,
    last_page_size: usize,
    selected: Option<usize>,
}

impl DataTable {
    /// Create a table over the given column set
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            row_clicks: false,
            page_buttons: Vec::new(),
            row_regions: Vec::new(),
            last_page_size: 0,
            selected: None,
        }
    }

    /// Highlight one row of the current page (keyboard selection)
    pub fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Make every cell of a row clickable, reporting the row's `id`
    #[must_use]
    pub const fn with_row_clicks(mut self) -> Self {
        self.row_clicks = true;
        self
    }

    /// The column schema
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Draw the table and record hit regions for `handle_mouse`
    pub fn render(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        rows: &[Value],
        pagination: Option<&Pagination>,
        loading: bool,
    ) {
        self.page_buttons.clear();
        self.row_regions.clear();

        if area.height == 0 || area.width == 0 {
            return;
        }

        let (body_area, pager_area) = if pagination.is_some() && area.height > 1 {
            (
                Rect::new(area.x, area.y, area.width, area.height - 1),
                Some(Rect::new(area.x, area.y + area.height - 1, area.width, 1)),
            )
        } else {
            (area, None)
        };

        let (start, end) = pagination.map_or((0, rows.len()), |p| p.slice_bounds(rows.len()));
        let page = rows.get(start..end).unwrap_or_default();

        self.render_body(frame, body_area, page, loading);

        if let (Some(pager), Some(pagination)) = (pager_area, pagination) {
            self.render_pager(frame, pager, pagination);
        }
    }

    fn render_body(&mut self, frame: &mut Frame<'_>, area: Rect, page: &[Value], loading: bool) {
        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(capitalize(&c.title)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let widths = vec![
            Constraint::Ratio(1, self.columns.len().max(1) as u32);
            self.columns.len().max(1)
        ];

        let body_rows: Vec<Row<'_>> = page
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = self
                    .columns
                    .iter()
                    .map(|column| Cell::from(cell_text(column, row, index)))
                    .collect::<Vec<_>>();
                let row = Row::new(cells);
                if self.selected == Some(index) {
                    row.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(body_rows, widths).header(header);
        frame.render_widget(table, area);

        if page.is_empty() {
            let message = if loading { "Loading..." } else { "No data available" };
            if area.height > 1 {
                let message_area = Rect::new(area.x, area.y + 1, area.width, 1);
                frame.render_widget(
                    Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
                    message_area,
                );
            }
            return;
        }

        if self.row_clicks {
            for (index, row) in page.iter().enumerate() {
                let y = area.y + 1 + index as u16;
                if y >= area.y + area.height {
                    break;
                }
                if let Some(id) = row_id(row) {
                    self.row_regions
                        .push((Rect::new(area.x, y, area.width, 1), id));
                }
            }
        }
    }

    fn render_pager(&mut self, frame: &mut Frame<'_>, area: Rect, pagination: &Pagination) {
        self.last_page_size = pagination.page_size;

        let mut spans = Vec::new();
        let mut x = area.x;
        for page in 1..=pagination.page_count() {
            let label = format!("[{page}]");
            let width = label.len() as u16;
            let style = if page == pagination.current.max(1) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            if x + width <= area.x + area.width {
                self.page_buttons
                    .push((Rect::new(x, area.y, width, 1), page));
            }
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Translate a mouse event into a table event, if it hits anything
    #[must_use]
    pub fn handle_mouse(&self, event: &MouseEvent) -> Option<TableEvent> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let position = Position::new(event.column, event.row);

        for (region, page) in &self.page_buttons {
            if region.contains(position) {
                return Some(TableEvent::PageChanged(*page, self.last_page_size));
            }
        }
        for (region, id) in &self.row_regions {
            if region.contains(position) {
                return Some(TableEvent::RowClicked(id.clone()));
            }
        }
        None
    }
}

/// Resolve a dotted path through nested objects and arrays
///
/// Returns `None` as soon as any segment is missing, which the table shows as
/// the placeholder instead of failing the view.
#[must_use]
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(list) => list.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn cell_text(column: &Column, row: &Value, index: usize) -> String {
    let value = resolve_path(row, &column.data_index);
    if let Some(render) = &column.render {
        return render(value, row, index);
    }
    match value {
        None | Some(Value::Null) => CELL_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The row's unique `id`, as a string whether the service sends it as one
#[must_use]
pub fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Uppercase the first character, leaving the rest untouched
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
