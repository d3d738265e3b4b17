//! Survey builder: assembles an ordered list of question definitions plus
//! a title, edited freely before one atomic "create survey" action.
//!
//! Questions are authored in a popup, previewed in the list with disabled
//! editors, and reordered with plain index moves (Shift+↑/↓). Validation
//! is synchronous and shown inline; nothing touches the network until the
//! draft is valid.

use crate::components::{EditorMode, Footer, Header, QuestionEditor};
use crate::draft::SurveyDraft;
use crate::models::Question;
use crate::routing::Route;
use crate::screens::screen::{Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::{center_popup, create_standard_layout, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderFocus {
    Title,
    Questions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionKind {
    Open,
    MultipleChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopupField {
    Content,
    Kind,
    Min,
    Options,
    Max,
}

/// The add-question popup.
struct QuestionPopup {
    content: TextInput,
    kind: QuestionKind,
    /// Minimum required answers; for multiple-choice also the minimum
    /// selection count. 0 means optional.
    min: TextInput,
    /// Option labels, comma separated (multiple-choice only).
    options: TextInput,
    /// Maximum selectable count; empty means single selection.
    max: TextInput,
    focused: PopupField,
    error: Option<String>,
}

impl QuestionPopup {
    fn new() -> Self {
        Self {
            content: TextInput::new(),
            kind: QuestionKind::Open,
            min: TextInput::with_text("0"),
            options: TextInput::new(),
            max: TextInput::new(),
            focused: PopupField::Content,
            error: None,
        }
    }

    fn focus_next(&mut self) {
        self.focused = match (self.focused, self.kind) {
            (PopupField::Content, _) => PopupField::Kind,
            (PopupField::Kind, _) => PopupField::Min,
            (PopupField::Min, QuestionKind::Open) => PopupField::Content,
            (PopupField::Min, QuestionKind::MultipleChoice) => PopupField::Options,
            (PopupField::Options, _) => PopupField::Max,
            (PopupField::Max, _) => PopupField::Content,
        };
    }

    /// Build the question, or explain what's missing.
    fn build(&self, id: i64) -> Result<Question, String> {
        let content = self.content.text_trimmed();
        if content.is_empty() {
            return Err("Question text can't be empty".to_string());
        }
        let min: u32 = match self.min.text_trimmed() {
            "" => 0,
            text => text
                .parse()
                .map_err(|_| "Minimum must be a number".to_string())?,
        };

        match self.kind {
            QuestionKind::Open => Ok(Question {
                id,
                content: content.to_string(),
                min: min.min(1),
                max: None,
                options: None,
            }),
            QuestionKind::MultipleChoice => {
                let options: Vec<String> = self
                    .options
                    .text()
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if options.len() < 2 {
                    return Err("A choice question needs at least two options".to_string());
                }
                let max: Option<u32> = match self.max.text_trimmed() {
                    "" => None,
                    text => Some(
                        text.parse()
                            .map_err(|_| "Maximum must be a number".to_string())?,
                    ),
                };
                if let Some(max) = max {
                    if max == 0 || max < min {
                        return Err("Maximum selections can't be below the minimum".to_string());
                    }
                    if max as usize > options.len() {
                        return Err("Maximum selections can't exceed the option count".to_string());
                    }
                }
                if min as usize > options.len() {
                    return Err("Minimum selections can't exceed the option count".to_string());
                }
                Ok(Question {
                    id,
                    content: content.to_string(),
                    min,
                    max,
                    options: Some(options),
                })
            }
        }
    }
}

pub struct BuilderScreen {
    draft: SurveyDraft,
    title_input: TextInput,
    focus: BuilderFocus,
    /// Selected question in the preview list.
    selected: usize,
    popup: Option<QuestionPopup>,
}

impl BuilderScreen {
    pub fn new() -> Self {
        Self {
            draft: SurveyDraft::new(),
            title_input: TextInput::new(),
            focus: BuilderFocus::Title,
            selected: 0,
            popup: None,
        }
    }

    fn clamp_selection(&mut self) {
        if self.draft.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.draft.len() - 1);
        }
    }

    fn selected_question_id(&self) -> Option<i64> {
        self.draft.questions().get(self.selected).map(|q| q.id)
    }

    fn handle_popup_key(&mut self, code: KeyCode) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.popup = None;
            }
            KeyCode::Tab | KeyCode::BackTab => popup.focus_next(),
            KeyCode::Enter => match popup.build(self.draft.fresh_id()) {
                Ok(question) => {
                    self.draft.add_question(question);
                    self.popup = None;
                    self.clamp_selection();
                }
                Err(message) => popup.error = Some(message),
            },
            KeyCode::Char(' ') if popup.focused == PopupField::Kind => {
                popup.kind = match popup.kind {
                    QuestionKind::Open => QuestionKind::MultipleChoice,
                    QuestionKind::MultipleChoice => QuestionKind::Open,
                };
                popup.error = None;
            }
            code => {
                let field = match popup.focused {
                    PopupField::Content => &mut popup.content,
                    PopupField::Kind => return,
                    PopupField::Min => &mut popup.min,
                    PopupField::Options => &mut popup.options,
                    PopupField::Max => &mut popup.max,
                };
                if field.handle_key(code) {
                    popup.error = None;
                }
            }
        }
    }

    fn render_popup(&self, frame: &mut Frame, area: Rect) {
        let Some(popup) = &self.popup else {
            return;
        };
        let t = theme();
        let popup_area = center_popup(area, 70, 70);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" New Question ")
            .title_style(t.title_style())
            .borders(Borders::ALL)
            .border_style(t.border_focused_style());
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // content
                Constraint::Length(1), // kind
                Constraint::Length(3), // min
                Constraint::Length(3), // options
                Constraint::Length(3), // max
                Constraint::Length(1), // error
                Constraint::Min(0),
            ])
            .split(inner);

        let content = TextInputWidget::new(&popup.content)
            .title("Question")
            .placeholder("What do you want to ask?")
            .focused(popup.focused == PopupField::Content);
        frame.render_text_input_widget(content, chunks[0]);

        let kind_label = match popup.kind {
            QuestionKind::Open => "Type: open-ended (Space to switch)",
            QuestionKind::MultipleChoice => "Type: multiple-choice (Space to switch)",
        };
        let kind_style = if popup.focused == PopupField::Kind {
            t.highlight_style()
        } else {
            t.text_style()
        };
        frame.render_widget(Paragraph::new(kind_label).style(kind_style), chunks[1]);

        let min = TextInputWidget::new(&popup.min)
            .title("Minimum required (0 = optional)")
            .focused(popup.focused == PopupField::Min);
        frame.render_text_input_widget(min, chunks[2]);

        if popup.kind == QuestionKind::MultipleChoice {
            let options = TextInputWidget::new(&popup.options)
                .title("Options (comma separated)")
                .placeholder("Cat, Dog")
                .focused(popup.focused == PopupField::Options);
            frame.render_text_input_widget(options, chunks[3]);

            let max = TextInputWidget::new(&popup.max)
                .title("Maximum selections (empty = one)")
                .focused(popup.focused == PopupField::Max);
            frame.render_text_input_widget(max, chunks[4]);
        }

        if let Some(error) = &popup.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(t.error_style()),
                chunks[5],
            );
        }
    }
}

impl Default for BuilderScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for BuilderScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let (header_area, content_area, footer_area) = create_standard_layout(area, 3, 3);
        let _ = Header::render(frame, header_area, "New Survey", ctx.session)?;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title input
                Constraint::Length(1), // validation error
                Constraint::Min(0),    // question previews
            ])
            .split(content_area);

        let title = TextInputWidget::new(&self.title_input)
            .title("Title")
            .placeholder("Untitled Survey")
            .focused(self.focus == BuilderFocus::Title && self.popup.is_none());
        frame.render_text_input_widget(title, chunks[0]);

        if let Some(error) = self.draft.error() {
            frame.render_widget(
                Paragraph::new(error.message()).style(t.error_style()),
                chunks[1],
            );
        }

        if self.draft.is_empty() {
            let hint = Paragraph::new("No questions yet — press 'a' to add one.")
                .style(t.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(hint, chunks[2]);
        } else {
            let mut y = chunks[2].y;
            for (index, question) in self.draft.questions().iter().enumerate() {
                let editor = QuestionEditor::new(question.clone(), EditorMode::Preview);
                let height = editor.height();
                if y + height > chunks[2].bottom() {
                    break;
                }
                let focused =
                    self.focus == BuilderFocus::Questions && index == self.selected;
                let row = Rect::new(chunks[2].x, y, chunks[2].width, height);
                if focused {
                    let marker = Rect::new(row.x, row.y + 1, 2u16.min(row.width), 1);
                    frame.render_widget(
                        Paragraph::new(LIST_HIGHLIGHT_SYMBOL).style(t.highlight_style()),
                        marker,
                    );
                }
                let editor_area = Rect::new(
                    row.x + 2,
                    row.y,
                    row.width.saturating_sub(2),
                    height,
                );
                editor.render(frame, editor_area, focused);
                y += height;
            }
        }

        let _ = Footer::render(
            frame,
            footer_area,
            "Add: a | Delete: d | Move: Shift+↑/↓ | Field: Tab | Submit: Ctrl+S | Cancel: Esc",
        )?;

        self.render_popup(frame, area);

        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        if self.popup.is_some() {
            self.handle_popup_key(key.code);
            return Ok(ScreenAction::None);
        }

        // Submission and cancellation work from either focus.
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some((title, questions)) = self.draft.submission() {
                    return Ok(ScreenAction::CreateSurvey { title, questions });
                }
                return Ok(ScreenAction::None);
            }
            KeyCode::Esc => return Ok(ScreenAction::Navigate(Route::Surveys)),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    BuilderFocus::Title => BuilderFocus::Questions,
                    BuilderFocus::Questions => BuilderFocus::Title,
                };
                return Ok(ScreenAction::None);
            }
            _ => {}
        }

        match self.focus {
            BuilderFocus::Title => {
                if self.title_input.handle_key(key.code) {
                    self.draft.set_title(self.title_input.text());
                }
            }
            BuilderFocus::Questions => match key.code {
                KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    if self.selected > 0 {
                        self.draft
                            .reorder(self.selected, Some(self.selected - 1));
                        self.selected -= 1;
                    }
                }
                KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
                    if self.selected + 1 < self.draft.len() {
                        self.draft
                            .reorder(self.selected, Some(self.selected + 1));
                        self.selected += 1;
                    }
                }
                KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                KeyCode::Down => {
                    if !self.draft.is_empty() {
                        self.selected = (self.selected + 1).min(self.draft.len() - 1);
                    }
                }
                KeyCode::Char('a') => self.popup = Some(QuestionPopup::new()),
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(id) = self.selected_question_id() {
                        self.draft.delete_question(id);
                        self.clamp_selection();
                    }
                }
                _ => {}
            },
        }

        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.popup.is_some() || self.focus == BuilderFocus::Title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press_with(screen: &mut BuilderScreen, code: KeyCode, modifiers: KeyModifiers) -> ScreenAction {
        let config = crate::config::Config::default();
        let session = crate::session::Session::Authenticated {
            name: "admin".to_string(),
        };
        let ctx = ScreenContext {
            config: &config,
            session: &session,
        };
        screen
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)), &ctx)
            .unwrap()
    }

    fn press(screen: &mut BuilderScreen, code: KeyCode) -> ScreenAction {
        press_with(screen, code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut BuilderScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn add_open_question(screen: &mut BuilderScreen, content: &str) {
        press(screen, KeyCode::Char('a'));
        type_text(screen, content);
        press(screen, KeyCode::Enter);
    }

    #[test]
    fn submit_without_title_records_error_and_stays() {
        let mut screen = BuilderScreen::new();
        let action = press_with(&mut screen, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(action, ScreenAction::None));
        assert!(screen.draft.error().is_some());
    }

    #[test]
    fn full_authoring_flow_produces_the_payload() {
        let mut screen = BuilderScreen::new();
        type_text(&mut screen, "Pets");
        press(&mut screen, KeyCode::Tab);
        add_open_question(&mut screen, "Why?");

        match press_with(&mut screen, KeyCode::Char('s'), KeyModifiers::CONTROL) {
            ScreenAction::CreateSurvey { title, questions } => {
                assert_eq!(title, "Pets");
                assert_eq!(questions.len(), 1);
                assert_eq!(questions[0].content, "Why?");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn shift_arrows_reorder_the_draft() {
        let mut screen = BuilderScreen::new();
        press(&mut screen, KeyCode::Tab);
        add_open_question(&mut screen, "first");
        add_open_question(&mut screen, "second");

        let contents = |screen: &BuilderScreen| -> Vec<String> {
            screen
                .draft
                .questions()
                .iter()
                .map(|q| q.content.clone())
                .collect()
        };
        assert_eq!(contents(&screen), vec!["first", "second"]);

        // Move the first question down.
        screen.selected = 0;
        press_with(&mut screen, KeyCode::Down, KeyModifiers::SHIFT);
        assert_eq!(contents(&screen), vec!["second", "first"]);
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn delete_removes_the_selected_question() {
        let mut screen = BuilderScreen::new();
        press(&mut screen, KeyCode::Tab);
        add_open_question(&mut screen, "first");
        add_open_question(&mut screen, "second");

        screen.selected = 0;
        press(&mut screen, KeyCode::Char('d'));
        assert_eq!(screen.draft.len(), 1);
        assert_eq!(screen.draft.questions()[0].content, "second");
    }

    #[test]
    fn popup_builds_choice_questions() {
        let popup = {
            let mut popup = QuestionPopup::new();
            popup.content.set_text("Cat or dog?");
            popup.kind = QuestionKind::MultipleChoice;
            popup.min.set_text("1");
            popup.options.set_text("Cat, Dog");
            popup
        };
        let question = popup.build(-1).unwrap();
        assert_eq!(question.options.as_deref().unwrap().len(), 2);
        assert_eq!(question.min, 1);
        assert!(question.is_multiple_choice());
    }

    #[test]
    fn popup_rejects_single_option_choice() {
        let mut popup = QuestionPopup::new();
        popup.content.set_text("Cat?");
        popup.kind = QuestionKind::MultipleChoice;
        popup.options.set_text("Cat");
        assert!(popup.build(-1).is_err());
    }

    #[test]
    fn popup_rejects_max_below_min() {
        let mut popup = QuestionPopup::new();
        popup.content.set_text("Pick");
        popup.kind = QuestionKind::MultipleChoice;
        popup.min.set_text("2");
        popup.max.set_text("1");
        popup.options.set_text("a, b, c");
        assert!(popup.build(-1).is_err());
    }

    #[test]
    fn cancelled_popup_leaves_the_draft_alone() {
        let mut screen = BuilderScreen::new();
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "discarded");
        press(&mut screen, KeyCode::Esc);
        assert!(screen.draft.is_empty());
        assert!(screen.popup.is_none());
    }
}
