use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::try_join;

use crate::api::{ApiClient, ApiError, Session, SessionStore};
use crate::config::Config;
use crate::stats;
use crate::ui::{
    AlertDialog, BranchesView, Dashboard, HeaderBar, LoginScreen, StatusBar, UsersView,
};
use crate::wizard::{BranchWizard, WizardOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    Users,
    Branches,
}

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Dashboard => "Dashboard",
            Screen::Users => "Manage Users",
            Screen::Branches => "Manage Branch",
        }
    }

    fn hints(self) -> &'static str {
        match self {
            Screen::Login => "",
            Screen::Dashboard => " [u] users  [b] branches  [r] refresh  [l] logout  [q] quit",
            Screen::Users => " [d] dashboard  [b] branches  [r] refresh  [l] logout  [q] quit",
            Screen::Branches => {
                " [a] add branch  [d] dashboard  [u] users  [r] refresh  [l] logout  [q] quit"
            }
        }
    }
}

pub struct App {
    config: Config,
    client: ApiClient,
    session: SessionStore,
    screen: Screen,
    login: LoginScreen,
    dashboard: Dashboard,
    users_view: UsersView,
    branches_view: BranchesView,
    wizard: BranchWizard,
    alert: AlertDialog,
    /// Deadline for the next dashboard re-fetch; only consulted while the
    /// dashboard is the active screen
    next_dashboard_refresh: Option<Instant>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session = SessionStore::open(&config)?;
        let client = ApiClient::new(&config, session.token().map(str::to_string))?;

        let screen = if session.current().is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        };

        if let Some(current) = session.current() {
            tracing::info!(username = %current.username, "Resuming persisted session");
        }

        Ok(Self {
            config,
            client,
            session,
            screen,
            login: LoginScreen::new(),
            dashboard: Dashboard::new(),
            users_view: UsersView::new(),
            branches_view: BranchesView::new(),
            wizard: BranchWizard::new(),
            alert: AlertDialog::new(),
            next_dashboard_refresh: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial data load for the starting screen
        if self.screen == Screen::Dashboard {
            self.mount_dashboard().await;
        }

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code).await;
                    }
                }
            }

            // Periodic dashboard refresh while mounted
            self.maybe_refresh_dashboard().await;
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        if self.screen == Screen::Login {
            self.login.render(frame);
            self.alert.render(frame);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(5),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        let header = HeaderBar {
            screen_title: self.screen.title(),
            username: self.session.current().map(|s| s.username.as_str()),
        };
        header.render(frame, chunks[0]);

        match self.screen {
            Screen::Dashboard => self.dashboard.render(frame, chunks[1]),
            Screen::Users => self.users_view.render(frame, chunks[1]),
            Screen::Branches => self.branches_view.render(frame, chunks[1]),
            Screen::Login => {}
        }

        let status = StatusBar {
            hints: self.screen.hints(),
        };
        status.render(frame, chunks[2]);

        self.wizard.render(frame);
        self.alert.render(frame);
    }

    async fn handle_key(&mut self, key: KeyCode) {
        // The alert is blocking: nothing else sees input until dismissed
        if self.alert.visible {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.alert.dismiss();
            }
            return;
        }

        if self.wizard.visible {
            match self.wizard.handle_key(key) {
                WizardOutcome::Submit => self.submit_wizard().await,
                WizardOutcome::Cancel | WizardOutcome::Continue => {}
            }
            return;
        }

        if self.screen == Screen::Login {
            match key {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Enter => self.do_login().await,
                other => self.login.handle_key(other),
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('d') => self.mount_dashboard().await,
            KeyCode::Char('u') => self.mount_users().await,
            KeyCode::Char('b') => self.mount_branches().await,
            KeyCode::Char('r') => self.refresh_current().await,
            KeyCode::Char('l') => self.logout(),
            KeyCode::Char('a') if self.screen == Screen::Branches => self.open_wizard().await,
            KeyCode::Up => match self.screen {
                Screen::Users => self.users_view.select_prev(),
                Screen::Branches => self.branches_view.select_prev(),
                _ => {}
            },
            KeyCode::Down => match self.screen {
                Screen::Users => self.users_view.select_next(),
                Screen::Branches => self.branches_view.select_next(),
                _ => {}
            },
            _ => {}
        }
    }

    // ─── Authentication ─────────────────────────────────────────────────────

    async fn do_login(&mut self) {
        if self.login.submitting {
            return;
        }
        if let Err(message) = self.login.validate() {
            self.login.error = Some(message);
            return;
        }

        self.login.submitting = true;
        let result = self
            .client
            .login(&self.login.username, &self.login.password)
            .await;
        self.login.submitting = false;

        match result {
            Ok(response) => {
                let username = self.login.username.trim().to_string();
                tracing::info!(username = %username, "Login succeeded");

                let session = Session::new(response.token.clone(), username);
                if let Err(err) = self.session.store(session) {
                    tracing::warn!(error = %err, "Failed to persist session");
                }
                self.client.set_token(Some(response.token));
                self.login.reset();
                self.mount_dashboard().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Login failed");
                self.login.error = Some(format!("Login failed: {err}"));
            }
        }
    }

    fn logout(&mut self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear session file");
        }
        self.client.set_token(None);
        self.login.reset();
        self.wizard.close();
        self.next_dashboard_refresh = None;
        self.screen = Screen::Login;
        tracing::info!("Signed out");
    }

    /// A 401 anywhere means the session is dead: clear the token and return
    /// to the login view
    fn expire_session(&mut self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear session file");
        }
        self.client.set_token(None);
        self.login.reset();
        self.login.error = Some("Session expired - please sign in again".to_string());
        self.wizard.close();
        self.next_dashboard_refresh = None;
        self.screen = Screen::Login;
        tracing::info!("Session expired, returning to login");
    }

    /// Route an API failure to the alert, or to session expiry on 401
    fn report_error(&mut self, title: &str, err: &ApiError) {
        if err.is_auth_error() {
            self.expire_session();
        } else {
            tracing::error!(error = %err, "{title}");
            self.alert.error(title, err.to_string());
        }
    }

    // ─── Screen mounts and refreshes ────────────────────────────────────────

    async fn mount_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        match stats::fetch(&self.client).await {
            Ok(stats) => self.dashboard.update(stats),
            Err(err) => self.report_error("Failed to load dashboard", &err),
        }
        self.next_dashboard_refresh = Some(Instant::now() + self.poll_interval());
    }

    /// Full re-fetch on the fixed dashboard period. A failed refresh keeps
    /// the previous numbers; only a 401 changes screens.
    async fn maybe_refresh_dashboard(&mut self) {
        if self.screen != Screen::Dashboard {
            return;
        }
        let Some(deadline) = self.next_dashboard_refresh else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }

        match stats::fetch(&self.client).await {
            Ok(stats) => self.dashboard.update(stats),
            Err(err) if err.is_auth_error() => {
                self.expire_session();
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Dashboard refresh failed, keeping previous stats");
            }
        }
        self.next_dashboard_refresh = Some(Instant::now() + self.poll_interval());
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.dashboard.poll_interval_secs)
    }

    async fn mount_users(&mut self) {
        self.screen = Screen::Users;
        match try_join!(self.client.users(), self.client.roles()) {
            Ok((users, roles)) => self.users_view.update(users, roles),
            Err(err) => self.report_error("Failed to load users", &err),
        }
    }

    async fn mount_branches(&mut self) {
        self.screen = Screen::Branches;
        self.refresh_branches().await;
    }

    async fn refresh_branches(&mut self) {
        match try_join!(self.client.branches(), self.client.areas()) {
            Ok((branches, areas)) => self.branches_view.update(branches, areas),
            Err(err) => self.report_error("Failed to load branches", &err),
        }
    }

    async fn refresh_current(&mut self) {
        match self.screen {
            Screen::Dashboard => self.mount_dashboard().await,
            Screen::Users => self.mount_users().await,
            Screen::Branches => self.refresh_branches().await,
            Screen::Login => {}
        }
    }

    // ─── Branch wizard ──────────────────────────────────────────────────────

    async fn open_wizard(&mut self) {
        let source_types = match self.client.source_types().await {
            Ok(types) => types,
            Err(err) => {
                self.report_error("Failed to load source types", &err);
                return;
            }
        };

        let areas = if self.branches_view.areas.is_empty() {
            match self.client.areas().await {
                Ok(areas) => areas,
                Err(err) => {
                    self.report_error("Failed to load areas", &err);
                    return;
                }
            }
        } else {
            self.branches_view.areas.clone()
        };

        self.wizard.open(areas, source_types);
    }

    /// One full-create request per confirm; the wizard stays on its final
    /// step when the call fails so the user can retry without re-entering
    /// anything
    async fn submit_wizard(&mut self) {
        let request = match self.wizard.state.full_create_request() {
            Ok(request) => request,
            Err(err) => {
                self.alert.error("Cannot save branch", err.to_string());
                return;
            }
        };

        self.wizard.submitting = true;
        let result = self.client.full_create_branch(&request).await;
        self.wizard.submitting = false;

        match result {
            Ok(created) => {
                tracing::info!(branch_id = created.branch_id, "Branch created");
                self.wizard.finish();
                self.alert
                    .info("Saved", "Branch and all related data saved successfully");
                self.refresh_branches().await;
            }
            Err(err) if err.is_auth_error() => self.expire_session(),
            Err(err) => {
                tracing::error!(error = %err, "Branch full-create failed");
                self.alert.error("Failed to save branch", err.to_string());
            }
        }
    }
}
