//! Generic list-screen with delete support
//!
//! One instance per tab. The screen holds a [`Resource`] handle for its
//! collection, renders it through the shared table, and runs the delete flow
//! as a small state machine: idle, confirming, deleting. A failed delete
//! drops back to confirming with the modal still open; a successful one
//! closes the modal and revalidates the collection (and its count resource,
//! when the screen has one).

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use futures::future::BoxFuture;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use serde_json::Value;
use std::sync::Arc;
use towadmin_client::{ApiClient, Resource};
use towadmin_core::Result;
use tracing::info;

use crate::components::{
    resolve_path, row_id, Column, ConfirmModal, DataTable, DropdownEvent, FilterDropdown,
    FilterOption, ModalEvent, Pagination, TableEvent, Toasts,
};
use crate::msg::AppMsg;
use crate::screens::{api_fetcher, list_options, ScreenDeps};

/// Issues the delete call for one row id
pub type DeleteRequest =
    Arc<dyn Fn(ApiClient, String) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Derives the confirmation label for a row
pub type ItemLabel = Arc<dyn Fn(&Value) -> String + Send + Sync>;

struct DeleteAction {
    label: ItemLabel,
    request: DeleteRequest,
}

struct ScreenFilter {
    label: &'static str,
    dropdown: FilterDropdown,
    key_for: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

struct DetailView {
    title: String,
    resource: Resource,
}

/// A list screen over one remote collection
pub struct CrudScreen {
    slug: &'static str,
    title: &'static str,
    deps: ScreenDeps,
    resource: Resource,
    count: Option<Resource>,
    table: DataTable,
    page: usize,
    selected: usize,
    delete: Option<DeleteAction>,
    modal: Option<ConfirmModal>,
    target_id: Option<String>,
    filter: Option<ScreenFilter>,
    detail_key: Option<Arc<dyn Fn(&str) -> String + Send + Sync>>,
    detail: Option<DetailView>,
}

impl std::fmt::Debug for CrudScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudScreen")
            .field("slug", &self.slug)
            .field("key", &self.resource.key())
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl CrudScreen {
    /// Compose a screen over the collection under `key`
    #[must_use]
    pub fn new(
        deps: &ScreenDeps,
        slug: &'static str,
        title: &'static str,
        key: &str,
        columns: Vec<Column>,
    ) -> Self {
        let resource = deps
            .cache
            .resource(key, api_fetcher(&deps.api, key), list_options());
        Self {
            slug,
            title,
            deps: deps.clone(),
            resource,
            count: None,
            table: DataTable::new(columns),
            page: 1,
            selected: 0,
            delete: None,
            modal: None,
            target_id: None,
            filter: None,
            detail_key: None,
            detail: None,
        }
    }

    /// Track a companion count resource, revalidated alongside the list
    #[must_use]
    pub fn with_count_key(mut self, key: &str) -> Self {
        self.count = Some(
            self.deps
                .cache
                .resource(key, api_fetcher(&self.deps.api, key), list_options()),
        );
        self
    }

    /// Enable row deletion
    #[must_use]
    pub fn with_delete(
        mut self,
        label: impl Fn(&Value) -> String + Send + Sync + 'static,
        request: impl Fn(ApiClient, String) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    ) -> Self {
        self.delete = Some(DeleteAction {
            label: Arc::new(label),
            request: Arc::new(request),
        });
        self
    }

    /// Attach a filter dropdown that re-keys the collection
    ///
    /// `key_for` maps an option id to the resource key to show; the empty id
    /// is the conventional "all" option.
    #[must_use]
    pub fn with_filter(
        mut self,
        label: &'static str,
        options: Vec<FilterOption>,
        selected: &str,
        key_for: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(ScreenFilter {
            label,
            dropdown: FilterDropdown::new(options).with_selected(selected),
            key_for: Arc::new(key_for),
        });
        self
    }

    /// Open a detail pane when a row is clicked
    ///
    /// `key_for` maps the row id to the detail resource key.
    #[must_use]
    pub fn with_detail(mut self, key_for: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.detail_key = Some(Arc::new(key_for));
        self.table = std::mem::take(&mut self.table).with_row_clicks();
        self
    }

    /// Routing identifier for background-task completions
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        self.slug
    }

    /// Tab title
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// Key of the collection currently shown (changes with the filter)
    #[must_use]
    pub fn resource_key(&self) -> &str {
        self.resource.key()
    }

    /// Whether the delete confirmation is open
    #[must_use]
    pub const fn is_confirming(&self) -> bool {
        self.modal.is_some()
    }

    /// Whether a delete request is in flight
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.modal.as_ref().is_some_and(ConfirmModal::is_loading)
    }

    /// Kick off the initial fetches; call when the tab becomes active
    pub fn on_enter(&self) {
        self.resource.ensure();
        if let Some(count) = &self.count {
            count.ensure();
        }
    }

    /// Rows of the full collection, empty until the first fetch lands
    #[must_use]
    pub fn rows(&self) -> Vec<Value> {
        self.resource
            .snapshot()
            .rows()
            .cloned()
            .unwrap_or_default()
    }

    fn pagination(&self, total: usize) -> Pagination {
        Pagination {
            current: self.page,
            page_size: self.deps.page_size,
            total,
        }
    }

    /// Draw the screen into `area`
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        if area.height < 3 || area.width == 0 {
            return;
        }

        let header = Rect::new(area.x, area.y, area.width, 1);
        let body = Rect::new(area.x, area.y + 2, area.width, area.height - 2);

        let snapshot = self.resource.snapshot();
        let rows = snapshot.rows().cloned().unwrap_or_default();

        self.render_header(frame, header, rows.len(), snapshot.error.as_deref());

        let (table_area, detail_area) = if self.detail.is_some() && body.width >= 60 {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(body);
            (halves[0], Some(halves[1]))
        } else {
            (body, None)
        };

        let pagination = self.pagination(rows.len());
        let (start, end) = pagination.slice_bounds(rows.len());
        let page_len = end - start;
        if page_len == 0 {
            self.selected = 0;
            self.table.set_selected(None);
        } else {
            self.selected = self.selected.min(page_len - 1);
            self.table.set_selected(Some(self.selected));
        }
        self.table
            .render(frame, table_area, &rows, Some(&pagination), snapshot.is_loading);

        if let (Some(detail_area), Some(detail)) = (detail_area, &self.detail) {
            render_detail(frame, detail_area, detail, self.deps.maps_api_key.as_deref());
        }

        // overlays last, so they sit above the table
        if let Some(filter) = &mut self.filter {
            let anchor = Rect::new(area.x, area.y + 1, area.width, 1);
            filter.dropdown.render(frame, anchor);
        }
        if let Some(modal) = &mut self.modal {
            modal.render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect, total: usize, error: Option<&str>) {
        let count = self.count.as_ref().map_or(total, |count| {
            count
                .snapshot()
                .data
                .as_ref()
                .and_then(count_value)
                .unwrap_or(total)
        });

        let mut spans = vec![
            Span::styled(
                self.title,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({count})")),
        ];
        if let Some(filter) = &self.filter {
            let current = filter
                .dropdown
                .selected()
                .filter(|id| !id.is_empty())
                .unwrap_or("all");
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{}: {current} [f]", filter.label),
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(error) = error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("! {error}"),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Route a key press
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let Some(modal) = &self.modal {
            match modal.handle_key(event) {
                Some(ModalEvent::Confirmed) => self.start_delete(),
                Some(ModalEvent::Cancelled) => self.cancel_delete(),
                None => {}
            }
            return;
        }

        match event.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = self.selected.saturating_add(1),
            KeyCode::Left => self.set_page(self.page.saturating_sub(1).max(1)),
            KeyCode::Right => self.set_page(self.page.saturating_add(1)),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('r') => self.resource.spawn_revalidate(),
            KeyCode::Char('f') => {
                if let Some(filter) = &mut self.filter {
                    filter.dropdown.toggle();
                }
            }
            KeyCode::Esc => self.detail = None,
            _ => {}
        }
    }

    /// Route a pointer event
    pub fn handle_mouse(&mut self, event: &MouseEvent) {
        if let Some(modal) = &self.modal {
            match modal.handle_mouse(event) {
                Some(ModalEvent::Confirmed) => self.start_delete(),
                Some(ModalEvent::Cancelled) => self.cancel_delete(),
                None => {}
            }
            // the modal blocks everything underneath
            return;
        }

        if self.filter.as_ref().is_some_and(|f| f.dropdown.is_open()) {
            let events = self
                .filter
                .as_mut()
                .map(|filter| filter.dropdown.handle_mouse(event))
                .unwrap_or_default();
            for event in events {
                if let DropdownEvent::Selected(option) = event {
                    self.apply_filter(&option.id);
                }
            }
            return;
        }

        match self.table.handle_mouse(event) {
            Some(TableEvent::PageChanged(page, _)) => self.set_page(page),
            Some(TableEvent::RowClicked(id)) => self.open_detail(&id),
            None => {}
        }
    }

    /// Apply a background-task completion addressed to this screen
    pub fn on_delete_finished(&mut self, outcome: Result<String>, toasts: &mut Toasts) {
        match outcome {
            Ok(label) => {
                info!(screen = self.slug, %label, "delete finished");
                self.modal = None;
                self.target_id = None;
                toasts.success(format!("Deleted {label}"));
                self.revalidate_after_mutation();
            }
            Err(err) => {
                // back to confirming; the user may retry or cancel
                toasts.error(format!("Delete failed: {err}"));
                if let Some(modal) = &mut self.modal {
                    modal.set_loading(false);
                }
            }
        }
    }

    fn set_page(&mut self, page: usize) {
        let total = self.rows().len();
        let pages = self.pagination(total).page_count().max(1);
        self.page = page.clamp(1, pages);
        self.selected = 0;
    }

    fn request_delete(&mut self) {
        let Some(action) = &self.delete else {
            return;
        };
        let rows = self.rows();
        let (start, end) = self.pagination(rows.len()).slice_bounds(rows.len());
        let Some(row) = rows.get(start..end).and_then(|page| page.get(self.selected)) else {
            return;
        };
        let Some(id) = row_id(row) else {
            return;
        };
        self.target_id = Some(id);
        self.modal = Some(ConfirmModal::new((action.label)(row)));
    }

    fn cancel_delete(&mut self) {
        self.modal = None;
        self.target_id = None;
    }

    fn start_delete(&mut self) {
        let (Some(action), Some(modal), Some(id)) =
            (&self.delete, &mut self.modal, self.target_id.clone())
        else {
            return;
        };
        if modal.is_loading() {
            return;
        }
        modal.set_loading(true);

        let label = modal.item_name().to_string();
        let request = action.request.clone();
        let api = self.deps.api.clone();
        let tx = self.deps.tx.clone();
        let slug = self.slug;
        self.deps.handle.spawn(async move {
            let outcome = request(api, id).await.map(|()| label);
            let _ = tx.send(AppMsg::DeleteFinished {
                screen: slug,
                outcome,
            });
        });
    }

    fn revalidate_after_mutation(&self) {
        let resource = self.resource.clone();
        let count = self.count.clone();
        self.deps.handle.spawn(async move {
            resource.mutate().await;
            if let Some(count) = count {
                count.mutate().await;
            }
        });
    }

    fn apply_filter(&mut self, option_id: &str) {
        let Some(filter) = &self.filter else {
            return;
        };
        let key = (filter.key_for)(option_id);
        self.resource = self.deps.cache.resource(
            key.clone(),
            api_fetcher(&self.deps.api, key),
            list_options(),
        );
        self.resource.ensure();
        self.page = 1;
        self.selected = 0;
    }

    fn open_detail(&mut self, id: &str) {
        let Some(key_for) = &self.detail_key else {
            return;
        };
        let key = key_for(id);
        let resource = self.deps.cache.resource(
            key.clone(),
            api_fetcher(&self.deps.api, key),
            list_options(),
        );
        resource.ensure();
        self.detail = Some(DetailView {
            title: format!("Detail {id}"),
            resource,
        });
    }
}

/// Extract a count from the shapes the service sends (`5` or `{"count": 5}`)
fn count_value(data: &Value) -> Option<usize> {
    match data {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::Object(map) => map.get("count").and_then(Value::as_u64).map(|n| n as usize),
        _ => None,
    }
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, detail: &DetailView, maps_key: Option<&str>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(detail.title.clone());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let snapshot = detail.resource.snapshot();
    let mut lines: Vec<Line<'_>> = Vec::new();
    match &snapshot.data {
        Some(Value::Object(map)) => {
            for (field, value) in map {
                let shown = match value {
                    Value::Null => "-".to_string(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                lines.push(Line::from(format!("{field}: {shown}")));
            }
            if let Some(url) = maps_link(&Value::Object(map.clone()), maps_key) {
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    format!("Map: {url}"),
                    Style::default().fg(Color::Cyan),
                ));
            }
        }
        Some(other) => lines.push(Line::from(other.to_string())),
        None if snapshot.is_loading => lines.push(Line::from("Loading...")),
        None => lines.push(Line::from(
            snapshot.error.unwrap_or_else(|| "No data available".to_string()),
        )),
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Static-map link for a record carrying coordinates, when a key is configured
fn maps_link(record: &Value, maps_key: Option<&str>) -> Option<String> {
    let key = maps_key?;
    let latitude = coordinate(record, &["latitude", "lat", "location.latitude"])?;
    let longitude = coordinate(record, &["longitude", "lng", "location.longitude"])?;
    Some(format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={latitude},{longitude}&zoom=14&size=400x300&key={key}"
    ))
}

fn coordinate(record: &Value, paths: &[&str]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| resolve_path(record, path))
        .and_then(Value::as_f64)
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::time::Duration;
    use tokio::runtime::Runtime;
    use tokio::sync::mpsc;
    use towadmin_client::ResourceCache;
    use towadmin_core::types::{Session, UserRole};
    use towadmin_core::Error;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap_or_else(|e| panic!("runtime should build: {e}"))
    }

    fn deps(
        runtime: &Runtime,
        cache: &ResourceCache,
    ) -> (ScreenDeps, mpsc::UnboundedReceiver<AppMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deps = ScreenDeps {
            api: ApiClient::new("http://localhost:1", "admins"),
            cache: cache.clone(),
            handle: runtime.handle().clone(),
            tx,
            session: Session {
                token: "t".to_string(),
                role: UserRole::Admin,
                display_name: "Ops".to_string(),
            },
            page_size: 2,
            maps_api_key: None,
        };
        (deps, rx)
    }

    /// Pre-register the key with a canned payload so the screen's own
    /// fetcher (which would hit the network) is never installed.
    fn seed(runtime: &Runtime, cache: &ResourceCache, key: &str, payload: Value) {
        let resource = cache.resource(
            key,
            Arc::new(move || {
                let payload = payload.clone();
                Box::pin(async move { Ok::<_, Error>(payload) })
            }),
            list_options(),
        );
        runtime.block_on(resource.revalidate());
    }

    fn customers_screen(deps: &ScreenDeps) -> CrudScreen {
        CrudScreen::new(
            deps,
            "customers",
            "Customers",
            "users/",
            vec![Column::new("name", "name", "name")],
        )
        .with_delete(
            |row| {
                resolve_path(row, "name")
                    .and_then(Value::as_str)
                    .unwrap_or("record")
                    .to_string()
            },
            |_, _| Box::pin(async { Ok(()) }),
        )
    }

    fn draw(screen: &mut CrudScreen) -> String {
        let backend = TestBackend::new(80, 14);
        let mut terminal =
            Terminal::new(backend).unwrap_or_else(|e| panic!("terminal should build: {e}"));
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.render(frame, area);
            })
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn people() -> Value {
        json!([
            { "id": 1, "name": "Ada Obi" },
            { "id": 2, "name": "Bayo Ade" },
            { "id": 3, "name": "Chi Eze" },
        ])
    }

    #[test]
    fn renders_title_count_and_rows() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, _rx) = deps(&runtime, &cache);

        let mut screen = customers_screen(&deps);
        let text = draw(&mut screen);

        assert!(text.contains("Customers (3)"));
        assert!(text.contains("Ada Obi"));
        // page size 2: third row is on page 2
        assert!(!text.contains("Chi Eze"));
    }

    #[test]
    fn delete_confirm_then_success_closes_modal_and_toasts() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, mut rx) = deps(&runtime, &cache);
        let mut toasts = Toasts::new(Duration::from_secs(60));

        let mut screen = customers_screen(&deps);
        draw(&mut screen);

        screen.handle_key(&key(KeyCode::Char('d')));
        assert!(screen.is_confirming());
        let text = draw(&mut screen);
        assert!(text.contains("Delete Ada Obi?"));

        // Enter confirms and spawns the request
        screen.handle_key(&key(KeyCode::Enter));
        assert!(screen.is_deleting());

        let msg = runtime
            .block_on(rx.recv())
            .unwrap_or_else(|| panic!("delete completion should arrive"));
        let AppMsg::DeleteFinished { screen: slug, outcome } = msg else {
            panic!("unexpected message");
        };
        assert_eq!(slug, "customers");
        let label = outcome.unwrap_or_else(|e| panic!("delete should succeed: {e}"));
        assert_eq!(label, "Ada Obi");

        screen.on_delete_finished(Ok(label), &mut toasts);
        assert!(!screen.is_confirming());
        assert_eq!(toasts.items().len(), 1);
        assert!(toasts.items()[0].message.contains("Ada Obi"));
    }

    #[test]
    fn failed_delete_returns_to_confirming() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, _rx) = deps(&runtime, &cache);
        let mut toasts = Toasts::new(Duration::from_secs(60));

        let mut screen = customers_screen(&deps);
        draw(&mut screen);
        screen.handle_key(&key(KeyCode::Char('d')));
        screen.handle_key(&key(KeyCode::Enter));
        assert!(screen.is_deleting());

        screen.on_delete_finished(
            Err(Error::Api {
                status: "failed".to_string(),
                message: "token expired".to_string(),
            }),
            &mut toasts,
        );

        // modal stays open, no longer loading; user may retry or cancel
        assert!(screen.is_confirming());
        assert!(!screen.is_deleting());
        assert_eq!(toasts.items().len(), 1);
        assert!(toasts.items()[0].message.contains("token expired"));

        screen.handle_key(&key(KeyCode::Char('n')));
        assert!(!screen.is_confirming());
    }

    #[test]
    fn confirm_is_ignored_while_deleting() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, mut rx) = deps(&runtime, &cache);

        let mut screen = customers_screen(&deps);
        draw(&mut screen);
        screen.handle_key(&key(KeyCode::Char('d')));
        screen.handle_key(&key(KeyCode::Enter));
        // second Enter must not double-fire
        screen.handle_key(&key(KeyCode::Enter));

        runtime
            .block_on(rx.recv())
            .unwrap_or_else(|| panic!("first completion should arrive"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn selection_moves_and_clamps_to_page() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, _rx) = deps(&runtime, &cache);

        let mut screen = customers_screen(&deps);
        draw(&mut screen);

        screen.handle_key(&key(KeyCode::Down));
        screen.handle_key(&key(KeyCode::Down));
        screen.handle_key(&key(KeyCode::Down));
        draw(&mut screen);
        screen.handle_key(&key(KeyCode::Char('d')));

        // clamped to the last row of the 2-row page
        let modal_text = draw(&mut screen);
        assert!(modal_text.contains("Delete Bayo Ade?"));
    }

    #[test]
    fn filter_selection_re_keys_the_resource_and_resets_page() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "bookings/requests/", people());
        seed(
            &runtime,
            &cache,
            "bookings/requests/?status=pending",
            json!([{ "id": 9, "name": "Pending Only" }]),
        );
        let (deps, _rx) = deps(&runtime, &cache);

        let mut screen = CrudScreen::new(
            &deps,
            "bookings",
            "Bookings",
            "bookings/requests/",
            vec![Column::new("name", "name", "name")],
        )
        .with_filter(
            "Status",
            vec![
                FilterOption::new("", "All"),
                FilterOption::new("pending", "Pending"),
            ],
            "",
            |id| {
                if id.is_empty() {
                    "bookings/requests/".to_string()
                } else {
                    format!("bookings/requests/?status={id}")
                }
            },
        );
        screen.page = 2;

        screen.apply_filter("pending");
        assert_eq!(screen.resource_key(), "bookings/requests/?status=pending");
        assert_eq!(screen.page, 1);

        let text = draw(&mut screen);
        assert!(text.contains("Pending Only"));

        screen.apply_filter("");
        assert_eq!(screen.resource_key(), "bookings/requests/");
    }

    #[test]
    fn page_keys_clamp_to_valid_range() {
        let runtime = runtime();
        let cache = ResourceCache::new(runtime.handle().clone());
        seed(&runtime, &cache, "users/", people());
        let (deps, _rx) = deps(&runtime, &cache);

        let mut screen = customers_screen(&deps);
        draw(&mut screen);

        screen.handle_key(&key(KeyCode::Right));
        assert_eq!(screen.page, 2);
        screen.handle_key(&key(KeyCode::Right));
        assert_eq!(screen.page, 2);
        screen.handle_key(&key(KeyCode::Left));
        screen.handle_key(&key(KeyCode::Left));
        assert_eq!(screen.page, 1);
    }

    #[test]
    fn maps_link_needs_key_and_coordinates() {
        let record = json!({ "latitude": 6.45, "longitude": 3.39 });
        assert!(maps_link(&record, None).is_none());

        let url = maps_link(&record, Some("k3y"))
            .unwrap_or_else(|| panic!("link should build"));
        assert!(url.contains("center=6.45,3.39"));
        assert!(url.contains("key=k3y"));

        let no_coords = json!({ "name": "x" });
        assert!(maps_link(&no_coords, Some("k3y")).is_none());
    }
}
