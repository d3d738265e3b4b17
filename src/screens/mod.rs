//! Screen controllers.
//!
//! Each screen owns its state exclusively and handles both rendering and
//! events; event handling returns a [`ScreenAction`] instead of mutating
//! global state, so navigation and API effects stay in the root
//! controller.

pub mod builder;
pub mod login;
pub mod results;
pub mod screen;
pub mod survey_form;
pub mod survey_list;

pub use builder::BuilderScreen;
pub use login::LoginScreen;
pub use results::ResultsScreen;
pub use screen::{Screen, ScreenAction, ScreenContext};
pub use survey_form::SurveyFormScreen;
pub use survey_list::SurveyListScreen;
