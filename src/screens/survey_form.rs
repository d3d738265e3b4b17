//! Respondent form: answer-mode editors for one survey's questions.

use crate::components::{EditorMode, Footer, Header, QuestionEditor};
use crate::models::{Answer, Question, Reply};
use crate::routing::Route;
use crate::screens::screen::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

pub struct SurveyFormScreen {
    survey_id: i64,
    title: String,
    editors: Vec<QuestionEditor>,
    focused: usize,
    /// First row of the editor stack currently scrolled into view.
    scroll: usize,
    /// Local validation error, shown inline above the footer.
    error: Option<String>,
    loading: bool,
}

impl SurveyFormScreen {
    pub fn new(survey_id: i64, title: impl Into<String>) -> Self {
        Self {
            survey_id,
            title: title.into(),
            editors: Vec::new(),
            focused: 0,
            scroll: 0,
            error: None,
            loading: true,
        }
    }

    pub fn survey_id(&self) -> i64 {
        self.survey_id
    }

    /// Install the questions fetched for this survey.
    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.editors = questions
            .into_iter()
            .map(|q| QuestionEditor::new(q, EditorMode::Answer))
            .collect();
        self.focused = 0;
        self.scroll = 0;
        self.loading = false;
    }

    fn focus_next(&mut self) {
        if !self.editors.is_empty() {
            self.focused = (self.focused + 1).min(self.editors.len() - 1);
        }
    }

    fn focus_previous(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    /// Validate every editor against its question's constraints and build
    /// the reply. Optional unanswered questions are omitted; answers keep
    /// the survey's question order.
    fn build_reply(&mut self) -> Option<Reply> {
        for editor in &self.editors {
            if let Err(message) = editor.check() {
                self.error = Some(message);
                return None;
            }
        }
        self.error = None;
        let answers: Vec<Answer> = self
            .editors
            .iter()
            .filter_map(|editor| {
                editor.answer().map(|value| Answer {
                    question: editor.id(),
                    value,
                })
            })
            .collect();
        Some(Reply {
            survey: self.survey_id,
            answers,
        })
    }
}

impl Screen for SurveyFormScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let (header_area, content_area, footer_area) = create_standard_layout(area, 3, 3);
        let _ = Header::render(frame, header_area, &self.title, ctx.session)?;

        let (editors_area, error_area) = {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(content_area);
            (chunks[0], chunks[1])
        };

        if self.loading || self.editors.is_empty() {
            let text = if self.loading {
                "Loading questions..."
            } else {
                "This survey has no questions."
            };
            let pending = Paragraph::new(text)
                .style(t.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(pending, editors_area);
        } else {
            // Keep the focused editor visible: scroll whole editors, not
            // rows, so borders never render half-clipped.
            if self.focused < self.scroll {
                self.scroll = self.focused;
            }
            loop {
                let visible_height: u16 = self.editors[self.scroll..=self.focused.min(self.editors.len() - 1)]
                    .iter()
                    .map(QuestionEditor::height)
                    .sum();
                if visible_height <= editors_area.height || self.scroll >= self.focused {
                    break;
                }
                self.scroll += 1;
            }

            let mut y = editors_area.y;
            for (index, editor) in self.editors.iter().enumerate().skip(self.scroll) {
                let height = editor.height();
                if y + height > editors_area.bottom() {
                    break;
                }
                let editor_area = Rect::new(editors_area.x, y, editors_area.width, height);
                editor.render(frame, editor_area, index == self.focused);
                y += height;
            }
        }

        if let Some(error) = &self.error {
            let error_line = Paragraph::new(error.as_str())
                .style(t.error_style())
                .alignment(Alignment::Center);
            frame.render_widget(error_line, error_area);
        }

        let _ = Footer::render(
            frame,
            footer_area,
            "Next question: Tab | Select: Space | Submit: Ctrl+S | Back: Esc",
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
            KeyCode::Esc => return Ok(ScreenAction::Navigate(Route::Surveys)),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(reply) = self.build_reply() {
                    return Ok(ScreenAction::SubmitReply(reply));
                }
            }
            code => {
                if let Some(editor) = self.editors.get_mut(self.focused) {
                    if editor.handle_key(code) {
                        // Any change invalidates the previous inline error.
                        self.error = None;
                    }
                }
            }
        }

        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        // Open-ended editors swallow plain letters whenever one has focus.
        self.editors
            .get(self.focused)
            .is_some_and(|editor| !editor.question().is_multiple_choice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;

    fn open(id: i64, min: u32) -> Question {
        Question {
            id,
            content: format!("q{}", id),
            min,
            max: None,
            options: None,
        }
    }

    fn choice(id: i64, min: u32) -> Question {
        Question {
            id,
            content: format!("q{}", id),
            min,
            max: None,
            options: Some(vec!["Cat".to_string(), "Dog".to_string()]),
        }
    }

    #[test]
    fn missing_required_answer_blocks_the_reply() {
        let mut screen = SurveyFormScreen::new(7, "Pets");
        screen.set_questions(vec![open(1, 1)]);
        assert!(screen.build_reply().is_none());
        assert!(screen.error.is_some());
    }

    #[test]
    fn optional_unanswered_questions_are_omitted() {
        let mut screen = SurveyFormScreen::new(7, "Pets");
        screen.set_questions(vec![open(1, 0), choice(2, 1)]);

        // Answer only the required multiple-choice question.
        screen.focused = 1;
        screen.editors[1].handle_key(KeyCode::Char(' '));

        let reply = screen.build_reply().unwrap();
        assert_eq!(reply.survey, 7);
        assert_eq!(reply.answers.len(), 1);
        assert_eq!(reply.answers[0].question, 2);
        assert_eq!(
            reply.answers[0].value,
            AnswerValue::Choices(vec!["Cat".to_string()])
        );
    }

    #[test]
    fn answers_keep_question_order() {
        let mut screen = SurveyFormScreen::new(7, "Pets");
        screen.set_questions(vec![open(5, 0), open(3, 0)]);
        for c in "one".chars() {
            screen.editors[0].handle_key(KeyCode::Char(c));
        }
        for c in "two".chars() {
            screen.editors[1].handle_key(KeyCode::Char(c));
        }
        let reply = screen.build_reply().unwrap();
        let ids: Vec<i64> = reply.answers.iter().map(|a| a.question).collect();
        assert_eq!(ids, vec![5, 3]);
    }
}
