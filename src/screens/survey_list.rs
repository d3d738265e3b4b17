//! Survey list screen: the landing view and the target of every
//! redirect.

use crate::components::{Footer, Header};
use crate::models::Survey;
use crate::routing::Route;
use crate::screens::screen::{Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::{create_standard_layout, ListStateExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub struct SurveyListScreen {
    surveys: Vec<Survey>,
    list_state: ListState,
}

impl SurveyListScreen {
    pub fn new() -> Self {
        Self {
            surveys: Vec::new(),
            list_state: ListState::default(),
        }
    }

    /// Replace the displayed surveys, keeping the selection in range.
    pub fn set_surveys(&mut self, surveys: Vec<Survey>) {
        self.surveys = surveys;
        if self.surveys.is_empty() {
            self.list_state.select(None);
        } else {
            let selected = self.list_state.selected().unwrap_or(0);
            self.list_state
                .select(Some(selected.min(self.surveys.len() - 1)));
        }
    }
}

impl Default for SurveyListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SurveyListScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let (header_area, content_area, footer_area) = create_standard_layout(area, 3, 2);

        let title = if ctx.session.is_authenticated() {
            "Your Surveys"
        } else {
            "Available surveys"
        };
        let _ = Header::render(frame, header_area, title, ctx.session)?;

        if self.surveys.is_empty() {
            let empty = Paragraph::new("No surveys yet.")
                .style(t.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(empty, content_area);
        } else {
            let items: Vec<ListItem> = self
                .surveys
                .iter()
                .map(|survey| {
                    let respondents = match survey.respondents {
                        0 => "no replies".to_string(),
                        1 => "1 reply".to_string(),
                        n => format!("{} replies", n),
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("  {}", survey.title), t.text_style()),
                        Span::styled(format!("  ({})", respondents), t.muted_style()),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(t.border_style()),
                )
                .highlight_style(t.highlight_style())
                .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
            frame.render_stateful_widget(list, content_area, &mut self.list_state);
        }

        let footer = if ctx.session.is_authenticated() {
            "Navigate: ↑/↓ | Open: Enter | New survey: a | Refresh: r | Logout: o | Quit: q"
        } else {
            "Navigate: ↑/↓ | Answer: Enter | Refresh: r | Login: l | Quit: q"
        };
        let _ = Footer::render(frame, footer_area, footer)?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list_state.move_up(self.surveys.len()),
            KeyCode::Down | KeyCode::Char('j') => self.list_state.move_down(self.surveys.len()),
            KeyCode::Home => self.list_state.select_first_item(self.surveys.len()),
            KeyCode::End => self.list_state.select_last_item(self.surveys.len()),
            KeyCode::Enter => {
                if let Some(idx) = self.list_state.selected_or_first(self.surveys.len()) {
                    return Ok(ScreenAction::Navigate(Route::Survey(self.surveys[idx].id)));
                }
            }
            KeyCode::Char('a') => {
                // The routing rules bounce this back to the list for
                // anonymous users; no need to special-case here.
                return Ok(ScreenAction::Navigate(Route::Builder));
            }
            KeyCode::Char('l') => return Ok(ScreenAction::Navigate(Route::Login)),
            KeyCode::Char('o') => {
                if ctx.session.is_authenticated() {
                    return Ok(ScreenAction::Logout);
                }
            }
            KeyCode::Char('r') => return Ok(ScreenAction::Refresh),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(ScreenAction::Quit),
            _ => {}
        }

        Ok(ScreenAction::None)
    }
}
