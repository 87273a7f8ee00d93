//! Application state and terminal event loop
//!
//! A synchronous draw loop over crossterm events; all network work runs on
//! the tokio runtime and reports back through the [`AppMsg`] channel, which
//! the loop drains once per tick.

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::execute;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use towadmin_client::{ApiClient, ResourceCache};
use towadmin_core::types::Session;
use towadmin_core::{Config, Error, Result};
use tracing::{error, info, warn};

use crate::components::Toasts;
use crate::msg::AppMsg;
use crate::screens::{
    admins, bookings, centers, customers, drivers, fees, operators, CrudScreen, LoginScreen,
    ScreenDeps,
};
use crate::session::{tabs_for, Tab};

/// The authenticated half of the application
struct Dashboard {
    session: Session,
    tabs: Vec<Tab>,
    active: usize,
    screens: Vec<CrudScreen>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("role", &self.session.role)
            .field("tabs", &self.tabs)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    fn new(deps: &ScreenDeps) -> Self {
        let tabs = tabs_for(deps.session.role);
        let screens = tabs
            .iter()
            .map(|tab| match tab {
                Tab::Customers => customers::screen(deps),
                Tab::Operators => operators::screen(deps),
                Tab::Drivers => drivers::screen(deps),
                Tab::Bookings => bookings::screen(deps),
                Tab::Fees => fees::screen(deps),
                Tab::CommandCenters => centers::screen(deps),
                Tab::Admins => admins::screen(deps),
            })
            .collect::<Vec<_>>();
        if let Some(first) = screens.first() {
            first.on_enter();
        }
        Self {
            session: deps.session.clone(),
            tabs,
            active: 0,
            screens,
        }
    }

    fn active_screen(&mut self) -> Option<&mut CrudScreen> {
        self.screens.get_mut(self.active)
    }

    fn switch_tab(&mut self, step: isize) {
        let count = self.tabs.len();
        if count == 0 {
            return;
        }
        let next = (self.active as isize + step).rem_euclid(count as isize) as usize;
        self.active = next;
        if let Some(screen) = self.screens.get(self.active) {
            screen.on_enter();
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let mut spans = Vec::new();
        for (index, tab) in self.tabs.iter().enumerate() {
            let style = if index == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("  {} ({})", self.session.display_name, self.session.role),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(ratatui::widgets::Paragraph::new(Line::from(spans)), chunks[0]);

        if let Some(screen) = self.screens.get_mut(self.active) {
            screen.render(frame, chunks[1]);
        }
    }
}

/// Top-level application state
pub struct App {
    config: Config,
    api: ApiClient,
    cache: ResourceCache,
    handle: Handle,
    tx: UnboundedSender<AppMsg>,
    rx: UnboundedReceiver<AppMsg>,
    login: LoginScreen,
    dashboard: Option<Dashboard>,
    toasts: Toasts,
    should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("dashboard", &self.dashboard)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the application against a runtime handle
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed from the
    /// configuration.
    pub fn new(config: Config, handle: Handle) -> Result<Self> {
        let api = ApiClient::from_config(&config.api)?;
        let cache = ResourceCache::new(handle.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let toast_ttl = Duration::from_secs(config.ui.toast_ttl);
        Ok(Self {
            config,
            api,
            cache,
            handle,
            tx,
            rx,
            login: LoginScreen::new(),
            dashboard: None,
            toasts: Toasts::new(toast_ttl),
            should_quit: false,
        })
    }

    /// Run the terminal event loop until quit
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured or drawing
    /// fails.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )
        .map_err(terminal_error)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

        let result = self.event_loop(&mut terminal);

        // restore the terminal even when the loop failed
        let _ = disable_raw_mode();
        let _ = execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        );
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick = Duration::from_millis(self.config.ui.tick_ms);
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(terminal_error)?;

            if event::poll(tick).map_err(terminal_error)? {
                match event::read().map_err(terminal_error)? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(&key),
                    Event::Mouse(mouse) => self.handle_mouse(&mouse),
                    Event::FocusGained => self.cache.handle_focus_gained(),
                    _ => {}
                }
            }

            while let Ok(msg) = self.rx.try_recv() {
                self.apply_msg(msg);
            }
            self.toasts.prune();
        }
        Ok(())
    }

    /// Draw one frame
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        if let Some(dashboard) = &mut self.dashboard {
            dashboard.render(frame, area);
        } else {
            self.login.render(frame, area);
        }
        self.toasts.render(frame, area);
    }

    /// Route a key press
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.dashboard.is_some() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Tab => {
                    if let Some(dashboard) = &mut self.dashboard {
                        dashboard.switch_tab(1);
                    }
                    return;
                }
                KeyCode::BackTab => {
                    if let Some(dashboard) = &mut self.dashboard {
                        dashboard.switch_tab(-1);
                    }
                    return;
                }
                KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.logout();
                    return;
                }
                _ => {}
            }
            if let Some(screen) = self.dashboard.as_mut().and_then(Dashboard::active_screen) {
                screen.handle_key(key);
            }
        } else {
            self.login.handle_key(key, &self.api, &self.handle, &self.tx);
        }
    }

    /// Route a pointer event to the active screen
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if let Some(screen) = self.dashboard.as_mut().and_then(Dashboard::active_screen) {
            screen.handle_mouse(mouse);
        }
    }

    /// Apply a background-task completion
    pub fn apply_msg(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::LoginFinished(outcome) => match *outcome {
                Ok(session) => self.open_dashboard(session),
                Err(err) => {
                    warn!(error = %err, "login failed");
                    self.login.on_error(err.to_string());
                }
            },
            AppMsg::ResetPasswordFinished(Ok(())) => self.login.on_reset_sent(),
            AppMsg::ResetPasswordFinished(Err(err)) => {
                warn!(error = %err, "password reset failed");
                self.login.on_error(err.to_string());
            }
            AppMsg::LogoutFinished(outcome) => {
                // the local session is already gone; just record the outcome
                if let Err(err) = outcome {
                    warn!(error = %err, "server-side logout failed");
                }
            }
            AppMsg::DeleteFinished { screen, outcome } => {
                let Some(dashboard) = &mut self.dashboard else {
                    if let Err(err) = outcome {
                        error!(screen, error = %err, "delete finished after logout");
                    }
                    return;
                };
                if let Some(target) = dashboard
                    .screens
                    .iter_mut()
                    .find(|candidate| candidate.slug() == screen)
                {
                    target.on_delete_finished(outcome, &mut self.toasts);
                }
            }
        }
    }

    fn open_dashboard(&mut self, session: Session) {
        info!(role = %session.role, "login succeeded");
        self.api = self.api.clone().with_token(session.token.clone());
        let deps = ScreenDeps {
            api: self.api.clone(),
            cache: self.cache.clone(),
            handle: self.handle.clone(),
            tx: self.tx.clone(),
            session: session.clone(),
            page_size: self.config.ui.page_size,
            maps_api_key: self.config.api.maps_api_key.clone(),
        };
        self.toasts
            .success(format!("Welcome, {}", session.display_name));
        self.dashboard = Some(Dashboard::new(&deps));
        self.login = LoginScreen::new();
    }

    fn logout(&mut self) {
        info!("logging out");
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = api.logout().await;
            let _ = tx.send(AppMsg::LogoutFinished(outcome));
        });

        // drop the session locally regardless of the server's answer
        self.api = self.api.clone().without_token();
        self.dashboard = None;
        self.toasts.success("Signed out");
    }
}

fn terminal_error(err: io::Error) -> Error {
    Error::Terminal(err.to_string())
}
