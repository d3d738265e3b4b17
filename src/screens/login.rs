//! Login screen: username and password fields.
//!
//! Only validation-free capture happens here; the actual login call and
//! its failure reporting live in the root controller.

use crate::components::{Footer, Header};
use crate::models::Credentials;
use crate::routing::Route;
use crate::screens::screen::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::utils::{center_popup, create_standard_layout, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

pub struct LoginScreen {
    username: TextInput,
    password: TextInput,
    focused: Field,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            username: TextInput::new(),
            password: TextInput::new(),
            focused: Field::Username,
        }
    }

    /// Clear both fields (called when navigating away).
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focused = Field::Username;
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let (header_area, content_area, footer_area) = create_standard_layout(area, 3, 2);
        let _ = Header::render(frame, header_area, "Login", ctx.session)?;

        let popup = center_popup(content_area, 60, 60);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(popup);

        let username = TextInputWidget::new(&self.username)
            .title("Username")
            .placeholder("email or username")
            .focused(self.focused == Field::Username);
        frame.render_text_input_widget(username, chunks[0]);

        let password = TextInputWidget::new(&self.password)
            .title("Password")
            .masked(true)
            .focused(self.focused == Field::Password);
        frame.render_text_input_widget(password, chunks[1]);

        let _ = Footer::render(
            frame,
            footer_area,
            "Switch field: Tab | Login: Enter | Back: Esc",
        )?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Esc => {
                self.reset();
                return Ok(ScreenAction::Navigate(Route::Surveys));
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused = match self.focused {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::Enter => {
                if !self.username.is_empty() && !self.password.text().is_empty() {
                    let credentials = Credentials {
                        username: self.username.text_trimmed().to_string(),
                        password: self.password.text().to_string(),
                    };
                    return Ok(ScreenAction::Login(credentials));
                }
            }
            code => {
                let field = match self.focused {
                    Field::Username => &mut self.username,
                    Field::Password => &mut self.password,
                };
                field.handle_key(code);
            }
        }

        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(screen: &mut LoginScreen, code: KeyCode) -> ScreenAction {
        let ctx_config = crate::config::Config::default();
        let session = crate::session::Session::Anonymous;
        let ctx = ScreenContext {
            config: &ctx_config,
            session: &session,
        };
        screen
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &ctx)
            .unwrap()
    }

    #[test]
    fn enter_with_empty_fields_does_nothing() {
        let mut screen = LoginScreen::new();
        assert!(matches!(press(&mut screen, KeyCode::Enter), ScreenAction::None));
    }

    #[test]
    fn enter_with_both_fields_yields_credentials() {
        let mut screen = LoginScreen::new();
        for c in "admin".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        press(&mut screen, KeyCode::Tab);
        for c in "secret".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        match press(&mut screen, KeyCode::Enter) {
            ScreenAction::Login(credentials) => {
                assert_eq!(credentials.username, "admin");
                assert_eq!(credentials.password, "secret");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn esc_returns_to_the_list_and_clears() {
        let mut screen = LoginScreen::new();
        press(&mut screen, KeyCode::Char('x'));
        match press(&mut screen, KeyCode::Esc) {
            ScreenAction::Navigate(Route::Surveys) => {}
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(screen.username.is_empty());
    }
}
