//! Top-level controller.
//!
//! `App` owns the API client, the session, the application state and the
//! screen. Session transitions are routed here directly: entering the main
//! view renders the default section, entering the login view hides the main
//! content.

use stockdesk_api::{ApiClient, ApiError};

use crate::screen::Screen;
use crate::section::Section;
use crate::session::{Session, SessionState, SessionTransition, TokenStore};
use crate::state::AppState;

pub struct App<S> {
    pub(crate) client: ApiClient,
    pub(crate) session: Session<S>,
    pub(crate) state: AppState,
    pub(crate) screen: Screen,
}

impl<S: TokenStore> App<S> {
    /// A logged-out app. Nothing is read or fetched until [`App::start`] or
    /// [`App::restore_session`].
    pub fn new(client: ApiClient, store: S) -> Self {
        Self {
            client,
            session: Session::new(store),
            state: AppState::new(),
            screen: Screen::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Page-load behavior: check the persisted token, then show either the
    /// login view or the main view with the stock list.
    pub async fn start(&mut self) -> SessionState {
        let transition = self.session.check();
        self.route(transition).await;
        self.session.state()
    }

    /// Pick up a persisted token without rendering anything.
    pub fn restore_session(&mut self) -> SessionState {
        match self.session.check() {
            SessionTransition::EnterMain => {
                self.sync_client_token();
                self.screen.show_main();
            }
            SessionTransition::EnterLogin => self.enter_login(None),
        }
        self.session.state()
    }

    /// Submit the login form.
    ///
    /// On failure the session stays logged out, nothing is persisted, and the
    /// login view shows the error.
    pub async fn login(&mut self, username: &str, password: &str) -> SessionState {
        let username = username.trim();
        tracing::info!(username, "login attempt");

        let token = match self.client.login(username, password).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.enter_login(Some(err.to_string()));
                return self.session.state();
            }
        };

        match self.session.login(token.access_token) {
            Ok(transition) => self.route(transition).await,
            Err(err) => {
                tracing::error!(error = %err, "failed to persist session token");
                self.enter_login(Some(format!("Could not save session: {err}")));
            }
        }
        self.session.state()
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.enter_login(None);
    }

    /// Navigation dispatcher: run the routine for `name`, or clear the
    /// display area when the name is not a section.
    pub async fn navigate(&mut self, name: &str) {
        match name.parse::<Section>() {
            Ok(section) => self.open(section).await,
            Err(err) => {
                tracing::warn!(%err, "navigation to unknown section");
                self.state.active = None;
                self.screen.clear();
            }
        }
    }

    /// Mark `section` active and render it.
    pub async fn open(&mut self, section: Section) {
        tracing::info!(%section, "open section");
        self.state.active = Some(section);
        match section {
            Section::StockList => self.render_stock_list().await,
            Section::SupplyPlan => self.render_supply_plan().await,
            Section::LogisticsPlan => self.render_logistics_plan().await,
            Section::ProductionReport => self.render_production_reports().await,
            Section::StockUpdate => self.render_stock_update().await,
            Section::RequiredParts => self.render_required_parts().await,
        }
    }

    async fn route(&mut self, transition: SessionTransition) {
        match transition {
            SessionTransition::EnterMain => self.enter_main().await,
            SessionTransition::EnterLogin => self.enter_login(None),
        }
    }

    async fn enter_main(&mut self) {
        self.sync_client_token();
        self.screen.show_main();
        self.open(Section::StockList).await;
    }

    fn enter_login(&mut self, error: Option<String>) {
        self.client.clear_token();
        self.screen.show_login(error);
    }

    fn sync_client_token(&mut self) {
        match self.session.token() {
            Some(token) => self.client.set_token(token),
            None => self.client.clear_token(),
        }
    }

    /// A 401/403 ends the session regardless of which call produced it.
    pub(crate) fn handle_auth_failure(&mut self, err: &ApiError) {
        if !err.is_unauthorized() {
            return;
        }
        tracing::warn!(status = ?err.status(), "backend rejected the session; logging out");
        self.session.logout();
        self.enter_login(Some(err.to_string()));
    }
}
