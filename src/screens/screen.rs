//! The screen trait and its associated types.

use crate::config::Config;
use crate::models::{Credentials, Question, Reply};
use crate::routing::Route;
use crate::session::Session;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources a screen gets while rendering and handling events.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub session: &'a Session,
}

/// What the root controller should do after an event.
///
/// Screens never touch the API client or the session themselves; they
/// describe the effect and the controller performs it.
#[derive(Debug, Clone)]
pub enum ScreenAction {
    /// Nothing to do.
    None,
    /// Navigate to a route (subject to the routing rules).
    Navigate(Route),
    /// Attempt a login with the entered credentials.
    Login(Credentials),
    /// End the current session.
    Logout,
    /// Refetch the survey list.
    Refresh,
    /// Submit a validated reply.
    SubmitReply(Reply),
    /// Run the two-step survey creation with a validated draft payload.
    CreateSurvey {
        title: String,
        questions: Vec<Question>,
    },
    /// Quit the application.
    Quit,
}

/// Trait for screen controllers.
pub trait Screen {
    /// Render the screen into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()>;

    /// Handle an input event and describe the resulting effect.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Whether a text input currently has focus. When true the root
    /// controller stops treating plain letters as shortcuts.
    fn is_input_focused(&self) -> bool {
        false
    }
}
