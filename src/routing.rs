//! Declarative view routing.
//!
//! Routes are plain data resolved against the session state and the known
//! survey set. All redirect rules live here so the root controller's
//! navigation is a single match on the resolved view.

use crate::models::Survey;
use crate::session::Session;

/// A navigation request, before auth and existence rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login form.
    Login,
    /// The survey list. Also the target of every redirect.
    Surveys,
    /// A specific survey by identifier.
    Survey(i64),
    /// The survey builder.
    Builder,
}

/// The view that actually gets rendered after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    SurveyList,
    /// The respondent form for one survey (anonymous visitors).
    RespondentForm(i64),
    /// The collected replies of one survey (admins).
    Results(i64),
    Builder,
}

/// Resolve a route to a view.
///
/// Rules:
/// - the builder requires an authenticated session, otherwise the list;
/// - a survey route renders the results view for admins and the
///   respondent form for everyone else;
/// - an unknown survey identifier redirects to the list;
/// - the login route redirects to the list when already authenticated.
///
/// An `Unknown` session is treated as not authenticated: the probe runs
/// before the first navigation, so the state only matters if a probe is
/// re-issued mid-session.
pub fn resolve(route: Route, session: &Session, surveys: &[Survey]) -> View {
    match route {
        Route::Login => {
            if session.is_authenticated() {
                View::SurveyList
            } else {
                View::Login
            }
        }
        Route::Surveys => View::SurveyList,
        Route::Builder => {
            if session.is_authenticated() {
                View::Builder
            } else {
                View::SurveyList
            }
        }
        Route::Survey(id) => {
            if !surveys.iter().any(|s| s.id == id) {
                View::SurveyList
            } else if session.is_authenticated() {
                View::Results(id)
            } else {
                View::RespondentForm(id)
            }
        }
    }
}
