//! Results view: pages through a survey's collected replies, one
//! respondent at a time. Admins only; routing enforces that.

use crate::components::{Footer, Header};
use crate::models::{AnswerValue, Question, Reply};
use crate::routing::Route;
use crate::screens::screen::{Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, REQUIRED_MARKER};
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub struct ResultsScreen {
    survey_id: i64,
    title: String,
    questions: Vec<Question>,
    replies: Vec<Reply>,
    /// Index of the reply currently on screen.
    current: usize,
    loading: bool,
}

impl ResultsScreen {
    pub fn new(survey_id: i64, title: impl Into<String>) -> Self {
        Self {
            survey_id,
            title: title.into(),
            questions: Vec::new(),
            replies: Vec::new(),
            current: 0,
            loading: true,
        }
    }

    pub fn survey_id(&self) -> i64 {
        self.survey_id
    }

    /// Install the fetched questions and replies.
    pub fn set_data(&mut self, questions: Vec<Question>, replies: Vec<Reply>) {
        self.questions = questions;
        self.replies = replies;
        self.current = 0;
        self.loading = false;
    }

    /// Clamped, non-wrapping pagination.
    fn next_reply(&mut self) {
        if !self.replies.is_empty() {
            self.current = (self.current + 1).min(self.replies.len() - 1);
        }
    }

    fn previous_reply(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    fn answer_text(&self, question_id: i64) -> String {
        let answer = self
            .replies
            .get(self.current)
            .and_then(|reply| reply.answers.iter().find(|a| a.question == question_id));
        match answer {
            Some(answer) => match &answer.value {
                AnswerValue::Text(text) => text.clone(),
                AnswerValue::Choices(choices) => choices.join(", "),
            },
            None => "—".to_string(),
        }
    }
}

impl Screen for ResultsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let (header_area, content_area, footer_area) = create_standard_layout(area, 3, 2);
        let title = format!("{} — replies", self.title);
        let _ = Header::render(frame, header_area, &title, ctx.session)?;

        if self.loading {
            let pending = Paragraph::new("Loading replies...")
                .style(t.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(pending, content_area);
        } else if self.replies.is_empty() {
            let empty = Paragraph::new("No replies yet.")
                .style(t.muted_style())
                .alignment(Alignment::Center);
            frame.render_widget(empty, content_area);
        } else {
            let position = format!(" Respondent {} of {} ", self.current + 1, self.replies.len());
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(t.border_style())
                .title(position)
                .title_style(t.title_style());
            let inner = block.inner(content_area);
            frame.render_widget(block, content_area);

            let mut lines: Vec<Line> = Vec::new();
            for question in &self.questions {
                let mut spans = vec![Span::styled(question.content.clone(), t.title_style())];
                if question.is_required() {
                    spans.push(Span::styled(
                        format!(" {}", REQUIRED_MARKER),
                        Style::default().fg(t.warning),
                    ));
                }
                lines.push(Line::from(spans));
                lines.push(Line::from(Span::styled(
                    format!("  {}", self.answer_text(question.id)),
                    t.text_style(),
                )));
                lines.push(Line::default());
            }
            let body = Paragraph::new(lines).wrap(Wrap { trim: false });
            frame.render_widget(body, inner);
        }

        let _ = Footer::render(
            frame,
            footer_area,
            "Previous: ← | Next: → | Back: Esc | Quit: q",
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
            KeyCode::Left | KeyCode::Char('h') => self.previous_reply(),
            KeyCode::Right | KeyCode::Char('l') => self.next_reply(),
            KeyCode::Esc => return Ok(ScreenAction::Navigate(Route::Surveys)),
            KeyCode::Char('q') => return Ok(ScreenAction::Quit),
            _ => {}
        }

        Ok(ScreenAction::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;

    fn question(id: i64) -> Question {
        Question {
            id,
            content: format!("q{}", id),
            min: 0,
            max: None,
            options: None,
        }
    }

    fn reply(text: &str) -> Reply {
        Reply {
            survey: 1,
            answers: vec![Answer {
                question: 1,
                value: AnswerValue::Text(text.to_string()),
            }],
        }
    }

    #[test]
    fn pagination_clamps_at_both_ends() {
        let mut screen = ResultsScreen::new(1, "Pets");
        screen.set_data(vec![question(1)], vec![reply("a"), reply("b")]);

        screen.previous_reply();
        assert_eq!(screen.current, 0);

        screen.next_reply();
        assert_eq!(screen.current, 1);
        screen.next_reply();
        assert_eq!(screen.current, 1);
    }

    #[test]
    fn missing_answer_renders_a_dash() {
        let mut screen = ResultsScreen::new(1, "Pets");
        screen.set_data(vec![question(1), question(2)], vec![reply("hi")]);
        assert_eq!(screen.answer_text(1), "hi");
        assert_eq!(screen.answer_text(2), "—");
    }

    #[test]
    fn choices_join_with_commas() {
        let mut screen = ResultsScreen::new(1, "Pets");
        let reply = Reply {
            survey: 1,
            answers: vec![Answer {
                question: 1,
                value: AnswerValue::Choices(vec!["Cat".to_string(), "Dog".to_string()]),
            }],
        };
        screen.set_data(vec![question(1)], vec![reply]);
        assert_eq!(screen.answer_text(1), "Cat, Dog");
    }
}
