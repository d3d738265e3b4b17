//! In-memory survey draft: the authoring state behind the builder view.
//!
//! A draft holds a title and an ordered sequence of question definitions,
//! edited freely until a single atomic "create survey" action. Reordering
//! is a plain index-based move, decoupled from whatever gesture drives it.

use crate::models::Question;

/// Synchronous validation failures, shown inline next to the offending
/// field and never sent anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    EmptyTitle,
    NoQuestions,
}

impl DraftError {
    pub fn message(self) -> &'static str {
        match self {
            DraftError::EmptyTitle => "Survey's title can't be empty",
            DraftError::NoQuestions => "Survey must contain at least one question",
        }
    }
}

/// The builder's working state.
#[derive(Debug, Default)]
pub struct SurveyDraft {
    title: String,
    questions: Vec<Question>,
    /// Last validation failure, kept for inline display until the next
    /// edit or submit attempt.
    error: Option<DraftError>,
    /// Local identifiers are negative so they can never collide with ids
    /// the service assigns. The service replaces them on creation.
    next_local_id: i64,
}

impl SurveyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.error = None;
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn error(&self) -> Option<DraftError> {
        self.error
    }

    /// Allocate a fresh local identifier for a question being authored.
    pub fn fresh_id(&mut self) -> i64 {
        self.next_local_id -= 1;
        self.next_local_id
    }

    /// Append a question to the end of the sequence. Identifier uniqueness
    /// is the caller's concern; [`fresh_id`](Self::fresh_id) guarantees it
    /// for locally authored questions.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.error = None;
    }

    /// Remove the entry whose identifier matches. No-op if absent; the
    /// relative order of the remaining entries is untouched.
    pub fn delete_question(&mut self, id: i64) {
        self.questions.retain(|q| q.id != id);
    }

    /// Move the element at `source` to `destination`, shifting the
    /// elements in between. A `None` destination (cancelled interaction)
    /// leaves the sequence unchanged, as does an out-of-range source;
    /// the destination index is clamped to the sequence.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) {
        let Some(destination) = destination else {
            return;
        };
        if source >= self.questions.len() {
            return;
        }
        let destination = destination.min(self.questions.len() - 1);
        if source == destination {
            return;
        }
        let question = self.questions.remove(source);
        self.questions.insert(destination, question);
    }

    /// Validate the draft: trimmed title non-empty, at least one question.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            Err(DraftError::EmptyTitle)
        } else if self.questions.is_empty() {
            Err(DraftError::NoQuestions)
        } else {
            Ok(())
        }
    }

    /// Validate and hand out the payload for the two-step creation.
    ///
    /// On failure the error is recorded for inline display and `None` is
    /// returned, so the caller never reaches the network. The draft itself
    /// is left intact either way; the caller discards it after a
    /// successful creation.
    pub fn submission(&mut self) -> Option<(String, Vec<Question>)> {
        match self.validate() {
            Ok(()) => {
                self.error = None;
                Some((self.title.trim().to_string(), self.questions.clone()))
            }
            Err(error) => {
                self.error = Some(error);
                None
            }
        }
    }
}
