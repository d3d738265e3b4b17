//! Root controller.
//!
//! Owns the session state, the active survey set, the single transient
//! message slot, and the screen router. Screens describe effects through
//! [`ScreenAction`]; this module performs them against the API client and
//! refreshes local state afterwards.
//!
//! Network calls run to completion on the event-loop thread through a
//! shared tokio runtime. Nothing is cancellable once issued and no
//! client-side timeout is enforced; the UI simply resumes when the call
//! returns.

use crate::api::{ApiClient, ApiError, CreateOutcome};
use crate::config::Config;
use crate::models::{Credentials, Question, Reply, Survey};
use crate::routing::{resolve, Route, View};
use crate::screens::{
    BuilderScreen, LoginScreen, ResultsScreen, Screen, ScreenAction, ScreenContext,
    SurveyFormScreen, SurveyListScreen,
};
use crate::session::Session;
use crate::tui::Tui;
use crate::widgets::ToastManager;
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

/// Which screen is currently routed in. The list and login screens keep
/// their state across navigations; the per-survey screens are built fresh
/// each time they are entered.
enum ActiveView {
    List,
    Login,
    Form(SurveyFormScreen),
    Results(ResultsScreen),
    Builder(BuilderScreen),
}

/// Main application state
pub struct App {
    config: Config,
    api: ApiClient,
    tui: Tui,
    runtime: Runtime,
    session: Session,
    surveys: Vec<Survey>,
    toasts: ToastManager,
    view: ActiveView,
    survey_list: SurveyListScreen,
    login: LoginScreen,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let api = ApiClient::new(&config.api_url).context("Failed to create API client")?;
        let tui = Tui::new()?;
        let toasts = ToastManager::new(Duration::from_secs(config.message_secs));

        Ok(Self {
            config,
            api,
            tui,
            runtime,
            session: Session::Unknown,
            surveys: Vec::new(),
            toasts,
            view: ActiveView::List,
            survey_list: SurveyListScreen::new(),
            login: LoginScreen::new(),
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        // Session probe and initial survey fetch, before the first draw.
        self.probe_session();
        self.refresh_surveys();

        loop {
            self.draw()?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so the toast slot expires even when the
            // user is idle.
            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                self.handle_event(event)?;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// `Unknown -> Authenticated` on a successful probe, `-> Anonymous`
    /// otherwise. Only a network failure is worth surfacing; an ordinary
    /// "no session" rejection is the expected answer for visitors.
    fn probe_session(&mut self) {
        match self.runtime.block_on(self.api.get_user_info()) {
            Ok(name) => {
                info!(%name, "session resumed");
                self.session.on_login(name);
            }
            Err(err) => {
                if !err.is_unauthorized() {
                    warn!(%err, "session probe failed");
                    self.toasts.error(err.to_string());
                }
                self.session.on_probe_failed();
            }
        }
    }

    fn refresh_surveys(&mut self) {
        match self.runtime.block_on(self.api.get_surveys()) {
            Ok(surveys) => {
                self.surveys = surveys;
                self.survey_list.set_surveys(self.surveys.clone());
            }
            Err(err) => self.report(&err),
        }
    }

    /// Authentication and network failures all land in the one message
    /// slot; a new failure overwrites whatever was showing.
    fn report(&mut self, err: &ApiError) {
        error!(%err, "api call failed");
        self.toasts.error(err.to_string());
    }

    fn draw(&mut self) -> Result<()> {
        self.toasts.tick();

        let Self {
            tui,
            config,
            session,
            toasts,
            view,
            survey_list,
            login,
            ..
        } = self;

        tui.draw(|frame| {
            let area = frame.area();
            let ctx = ScreenContext { config, session };
            let rendered = match view {
                ActiveView::List => survey_list.render(frame, area, &ctx),
                ActiveView::Login => login.render(frame, area, &ctx),
                ActiveView::Form(screen) => screen.render(frame, area, &ctx),
                ActiveView::Results(screen) => screen.render(frame, area, &ctx),
                ActiveView::Builder(screen) => screen.render(frame, area, &ctx),
            };
            if let Err(err) = rendered {
                error!(%err, "render failed");
            }
            toasts.render(frame, area);
        })
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        // Ctrl+C always quits, whatever has focus.
        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                self.should_quit = true;
                return Ok(());
            }
        }

        let action = {
            let ctx = ScreenContext {
                config: &self.config,
                session: &self.session,
            };
            match &mut self.view {
                ActiveView::List => self.survey_list.handle_event(event, &ctx)?,
                ActiveView::Login => self.login.handle_event(event, &ctx)?,
                ActiveView::Form(screen) => screen.handle_event(event, &ctx)?,
                ActiveView::Results(screen) => screen.handle_event(event, &ctx)?,
                ActiveView::Builder(screen) => screen.handle_event(event, &ctx)?,
            }
        };

        self.perform(action);
        Ok(())
    }

    fn perform(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::Refresh => self.refresh_surveys(),
            ScreenAction::Navigate(route) => self.navigate(route),
            ScreenAction::Login(credentials) => self.do_login(&credentials),
            ScreenAction::Logout => self.do_logout(),
            ScreenAction::SubmitReply(reply) => self.do_submit_reply(&reply),
            ScreenAction::CreateSurvey { title, questions } => {
                self.do_create_survey(&title, &questions);
            }
        }
    }

    /// Apply the routing rules and install the resolved screen.
    fn navigate(&mut self, route: Route) {
        match resolve(route, &self.session, &self.surveys) {
            View::SurveyList => self.view = ActiveView::List,
            View::Login => {
                self.login.reset();
                self.view = ActiveView::Login;
            }
            View::Builder => self.view = ActiveView::Builder(BuilderScreen::new()),
            View::RespondentForm(id) => self.enter_form(id),
            View::Results(id) => self.enter_results(id),
        }
    }

    fn survey_title(&self, id: i64) -> String {
        self.surveys
            .iter()
            .find(|s| s.id == id)
            .map_or_else(String::new, |s| s.title.clone())
    }

    fn enter_form(&mut self, id: i64) {
        let mut screen = SurveyFormScreen::new(id, self.survey_title(id));
        match self.runtime.block_on(self.api.get_questions(id)) {
            Ok(questions) => {
                screen.set_questions(questions);
                self.view = ActiveView::Form(screen);
            }
            Err(err) => {
                // Back to the list so the user can re-invoke the action.
                self.report(&err);
                self.view = ActiveView::List;
            }
        }
    }

    fn enter_results(&mut self, id: i64) {
        let mut screen = ResultsScreen::new(id, self.survey_title(id));
        let loaded = self.runtime.block_on(async {
            let questions = self.api.get_questions(id).await?;
            let replies = self.api.get_replies(id).await?;
            Ok::<_, ApiError>((questions, replies))
        });
        match loaded {
            Ok((questions, replies)) => {
                screen.set_data(questions, replies);
                self.view = ActiveView::Results(screen);
            }
            Err(err) => {
                self.report(&err);
                self.view = ActiveView::List;
            }
        }
    }

    fn do_login(&mut self, credentials: &Credentials) {
        match self.runtime.block_on(self.api.login(credentials)) {
            Ok(name) => {
                self.toasts.info(format!("Welcome, {}!", name));
                self.session.on_login(name);
                self.navigate(Route::Surveys);
                self.refresh_surveys();
            }
            Err(err) => self.report(&err),
        }
    }

    fn do_logout(&mut self) {
        match self.runtime.block_on(self.api.logout()) {
            Ok(()) => {
                self.session.on_logout();
                self.toasts.info("Logged out");
                self.navigate(Route::Surveys);
                self.refresh_surveys();
            }
            Err(err) => self.report(&err),
        }
    }

    fn do_submit_reply(&mut self, reply: &Reply) {
        match self.runtime.block_on(self.api.add_reply(reply)) {
            Ok(()) => {
                self.toasts.success("Thanks, your reply was recorded!");
                self.navigate(Route::Surveys);
                self.refresh_surveys();
            }
            // Stay on the form; the entered answers survive for a retry.
            Err(err) => self.report(&err),
        }
    }

    fn do_create_survey(&mut self, title: &str, questions: &[Question]) {
        let outcome = self
            .runtime
            .block_on(self.api.create_survey_with_questions(title, questions));
        match outcome {
            Ok(CreateOutcome::Created(id)) => {
                info!(id, %title, "survey created");
                self.toasts.success(format!("Survey \"{}\" created", title));
                self.navigate(Route::Surveys);
                self.refresh_surveys();
            }
            Ok(CreateOutcome::RolledBack { error }) => {
                // The draft is still on screen; the user can retry.
                self.toasts
                    .error(format!("Creating questions failed: {}", error));
            }
            Ok(CreateOutcome::Orphaned { survey_id, error }) => {
                warn!(survey_id, "orphaned survey left on the service");
                self.toasts.error(format!(
                    "Creating questions failed ({}); the empty survey could not be removed",
                    error
                ));
                self.refresh_surveys();
            }
            Err(err) => self.report(&err),
        }
    }
}
