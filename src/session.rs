//! Session state machine.
//!
//! Replaces the original global logged-in flag with an explicit value
//! owned by the root controller: created at startup as `Unknown`, updated
//! only by the probe, login, and logout outcomes.

/// The three session-relevant states of the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// Initial state while the session probe is in flight.
    #[default]
    Unknown,
    /// A valid admin session, with the display name the service returned.
    Authenticated { name: String },
    /// No valid session. Respondents stay here.
    Anonymous,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Display name of the logged-in admin, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Session::Authenticated { name } => Some(name),
            _ => None,
        }
    }

    /// A successful probe or login carries the admin's name.
    pub fn on_login(&mut self, name: String) {
        *self = Session::Authenticated { name };
    }

    /// A failed probe means there is no session to resume.
    pub fn on_probe_failed(&mut self) {
        *self = Session::Anonymous;
    }

    /// Logout always lands in `Anonymous`, whatever the previous state.
    pub fn on_logout(&mut self) {
        *self = Session::Anonymous;
    }
}
