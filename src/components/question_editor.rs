//! Per-question editor used by both the respondent form and the builder.
//!
//! One editor renders one question and, depending on its mode, either
//! captures an answer or previews the question as authored. The variant
//! (open-ended vs multiple-choice) follows from the question itself.

use crate::models::{AnswerValue, Question};
use crate::styles::{theme, REQUIRED_MARKER};
use crate::utils::text_input::TextInput;
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};

/// Open-ended answers are bounded to 200 characters.
pub const MAX_ANSWER_CHARS: usize = 200;

/// How the editor is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Builder preview: disabled, non-interactive, deletable.
    Preview,
    /// Respondent form: interactive, reports every change upward.
    Answer,
}

/// Editor for a single question.
#[derive(Debug)]
pub struct QuestionEditor {
    question: Question,
    mode: EditorMode,
    /// Free-text answer (open-ended only).
    text: TextInput,
    /// Selection flags, one per option (multiple-choice only).
    selected: Vec<bool>,
    /// Highlighted option (multiple-choice only).
    cursor: usize,
}

impl QuestionEditor {
    pub fn new(question: Question, mode: EditorMode) -> Self {
        let option_count = question.options.as_ref().map_or(0, Vec::len);
        Self {
            question,
            mode,
            text: TextInput::new().with_max_chars(MAX_ANSWER_CHARS),
            selected: vec![false; option_count],
            cursor: 0,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn id(&self) -> i64 {
        self.question.id
    }

    /// The answer captured so far, or `None` when nothing was entered.
    pub fn answer(&self) -> Option<AnswerValue> {
        if self.question.is_multiple_choice() {
            let options = self.question.options.as_deref().unwrap_or(&[]);
            let choices: Vec<String> = options
                .iter()
                .zip(&self.selected)
                .filter(|(_, &picked)| picked)
                .map(|(option, _)| option.clone())
                .collect();
            if choices.is_empty() {
                None
            } else {
                Some(AnswerValue::Choices(choices))
            }
        } else if self.text.is_empty() {
            None
        } else {
            Some(AnswerValue::Text(self.text.text_trimmed().to_string()))
        }
    }

    fn selection_count(&self) -> u32 {
        self.selected.iter().filter(|&&picked| picked).count() as u32
    }

    /// Local check against the question's constraints, run before the
    /// reply leaves the client. Returns the message to show inline.
    pub fn check(&self) -> Result<(), String> {
        let answered = self.answer().is_some_and(|a| !a.is_empty());
        if self.question.is_required() && !answered {
            return Err(format!("\"{}\" requires an answer", self.question.content));
        }
        if self.question.is_multiple_choice() && answered {
            let count = self.selection_count();
            if count < self.question.min {
                return Err(format!(
                    "\"{}\" needs at least {} selections",
                    self.question.content, self.question.min
                ));
            }
        }
        Ok(())
    }

    /// Handle a key in answer mode. Returns true when the captured answer
    /// may have changed, so the owner can re-read it.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.mode != EditorMode::Answer {
            return false;
        }
        if self.question.is_multiple_choice() {
            self.handle_choice_key(key)
        } else {
            self.text.handle_key(key)
        }
    }

    fn handle_choice_key(&mut self, key: KeyCode) -> bool {
        let option_count = self.selected.len();
        if option_count == 0 {
            return false;
        }
        match key {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(option_count - 1);
                false
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle(self.cursor);
                true
            }
            _ => false,
        }
    }

    /// Toggle an option, honoring the question's selectable bounds: a
    /// single-selection question behaves like a radio group; otherwise a
    /// toggle beyond `max` is refused.
    fn toggle(&mut self, index: usize) {
        if index >= self.selected.len() {
            return;
        }
        if self.selected[index] {
            self.selected[index] = false;
            return;
        }
        let max = self.question.max_selections();
        if max == 1 {
            self.selected.fill(false);
            self.selected[index] = true;
        } else if self.selection_count() < max {
            self.selected[index] = true;
        }
    }

    /// Rows this editor needs in a vertical stack.
    pub fn height(&self) -> u16 {
        if let Some(options) = &self.question.options {
            options.len() as u16 + 2
        } else {
            4
        }
    }

    /// Render the editor. `focused` highlights the border and, for
    /// open-ended questions, places the cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let disabled = self.mode == EditorMode::Preview;

        let mut title_spans = vec![Span::styled(
            format!(" {} ", self.question.content),
            if disabled { t.muted_style() } else { t.text_style() },
        )];
        if self.question.is_required() {
            title_spans.push(Span::styled(
                format!("{} ", REQUIRED_MARKER),
                Style::default().fg(t.warning),
            ));
        }

        let border_style = if disabled {
            t.muted_style()
        } else if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(title_spans));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(options) = &self.question.options {
            self.render_options(frame, inner, options, focused);
        } else {
            self.render_text(frame, inner, focused, disabled);
        }
    }

    fn render_options(&self, frame: &mut Frame, area: Rect, options: &[String], focused: bool) {
        let t = theme();
        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let marker = if self.selected.get(i).copied().unwrap_or(false) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if focused && i == self.cursor && self.mode == EditorMode::Answer {
                    t.highlight_style()
                } else if self.mode == EditorMode::Preview {
                    t.muted_style()
                } else {
                    t.text_style()
                };
                ListItem::new(format!(" {} {}", marker, option)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), area);
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, focused: bool, disabled: bool) {
        if disabled {
            let t = theme();
            let placeholder = Paragraph::new("your answer (max 200 characters)")
                .style(t.muted_style())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(t.muted_style()),
                );
            frame.render_widget(placeholder, area);
        } else {
            let widget = TextInputWidget::new(&self.text)
                .placeholder("your answer (max 200 characters)")
                .focused(focused);
            frame.render_text_input_widget(widget, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_question(min: u32) -> Question {
        Question {
            id: 1,
            content: "Anything else?".to_string(),
            min,
            max: None,
            options: None,
        }
    }

    fn choice_question(min: u32, max: Option<u32>) -> Question {
        Question {
            id: 2,
            content: "Favorite pets?".to_string(),
            min,
            max,
            options: Some(vec![
                "Cat".to_string(),
                "Dog".to_string(),
                "Fish".to_string(),
            ]),
        }
    }

    #[test]
    fn open_editor_captures_trimmed_text() {
        let mut editor = QuestionEditor::new(open_question(0), EditorMode::Answer);
        assert_eq!(editor.answer(), None);
        for c in " hi ".chars() {
            editor.handle_key(KeyCode::Char(c));
        }
        assert_eq!(editor.answer(), Some(AnswerValue::Text("hi".to_string())));
    }

    #[test]
    fn open_editor_caps_length() {
        let mut editor = QuestionEditor::new(open_question(0), EditorMode::Answer);
        for _ in 0..(MAX_ANSWER_CHARS + 50) {
            editor.handle_key(KeyCode::Char('x'));
        }
        match editor.answer() {
            Some(AnswerValue::Text(text)) => assert_eq!(text.chars().count(), MAX_ANSWER_CHARS),
            other => panic!("unexpected answer: {:?}", other),
        }
    }

    #[test]
    fn preview_mode_ignores_input() {
        let mut editor = QuestionEditor::new(open_question(0), EditorMode::Preview);
        assert!(!editor.handle_key(KeyCode::Char('x')));
        assert_eq!(editor.answer(), None);
    }

    #[test]
    fn single_selection_behaves_like_radio() {
        let mut editor = QuestionEditor::new(choice_question(1, None), EditorMode::Answer);
        editor.handle_key(KeyCode::Char(' '));
        editor.handle_key(KeyCode::Down);
        editor.handle_key(KeyCode::Char(' '));
        assert_eq!(
            editor.answer(),
            Some(AnswerValue::Choices(vec!["Dog".to_string()]))
        );
    }

    #[test]
    fn multi_selection_respects_max() {
        let mut editor = QuestionEditor::new(choice_question(1, Some(2)), EditorMode::Answer);
        editor.handle_key(KeyCode::Char(' ')); // Cat
        editor.handle_key(KeyCode::Down);
        editor.handle_key(KeyCode::Char(' ')); // Dog
        editor.handle_key(KeyCode::Down);
        editor.handle_key(KeyCode::Char(' ')); // Fish, refused
        assert_eq!(
            editor.answer(),
            Some(AnswerValue::Choices(vec![
                "Cat".to_string(),
                "Dog".to_string()
            ]))
        );
    }

    #[test]
    fn toggling_off_frees_a_slot() {
        let mut editor = QuestionEditor::new(choice_question(0, Some(1)), EditorMode::Answer);
        editor.handle_key(KeyCode::Char(' '));
        editor.handle_key(KeyCode::Char(' '));
        assert_eq!(editor.answer(), None);
    }

    #[test]
    fn required_question_without_answer_fails_check() {
        let editor = QuestionEditor::new(open_question(1), EditorMode::Answer);
        assert!(editor.check().is_err());
    }

    #[test]
    fn optional_question_without_answer_passes_check() {
        let editor = QuestionEditor::new(open_question(0), EditorMode::Answer);
        assert!(editor.check().is_ok());
    }

    #[test]
    fn min_selection_count_enforced() {
        let mut editor = QuestionEditor::new(choice_question(2, Some(3)), EditorMode::Answer);
        editor.handle_key(KeyCode::Char(' '));
        assert!(editor.check().is_err());
        editor.handle_key(KeyCode::Down);
        editor.handle_key(KeyCode::Char(' '));
        assert!(editor.check().is_ok());
    }
}
