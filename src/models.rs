//! Wire types shared between the API client and the views.

use serde::{Deserialize, Serialize};

/// A survey as returned by the service: a named, ordered collection of
/// questions plus the number of respondents so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Survey {
    pub id: i64,
    pub title: String,
    /// Ordered question identifiers. Some service endpoints omit this
    /// (the list endpoint returns only counts), so it defaults to empty.
    #[serde(default)]
    pub questions: Vec<i64>,
    /// How many respondents have submitted a reply.
    #[serde(default)]
    pub respondents: u32,
}

/// A single question. The presence of `options` distinguishes a
/// multiple-choice question from an open-ended one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub content: String,
    /// Minimum required answers: 0 means optional, >= 1 means required.
    /// For multiple-choice this is also the minimum selection count.
    #[serde(default)]
    pub min: u32,
    /// Maximum selectable options for multiple-choice. Absent means a
    /// single selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Question {
    /// Whether this question carries a fixed option set.
    pub fn is_multiple_choice(&self) -> bool {
        self.options.is_some()
    }

    /// Whether a respondent must answer this question.
    pub fn is_required(&self) -> bool {
        self.min >= 1
    }

    /// Effective maximum selection count for multiple-choice.
    pub fn max_selections(&self) -> u32 {
        self.max.unwrap_or(1).max(1)
    }
}

/// A respondent's answer to a single question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Free text for an open-ended question.
    Text(String),
    /// Selected options for a multiple-choice question.
    Choices(Vec<String>),
}

impl AnswerValue {
    /// An answer counts only if something was actually entered or selected.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.trim().is_empty(),
            AnswerValue::Choices(choices) => choices.is_empty(),
        }
    }
}

/// One (question, answer) pair inside a reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub question: i64,
    pub value: AnswerValue,
}

/// One respondent's full set of answers to a survey, submitted once and
/// never revisited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub survey: i64,
    pub answers: Vec<Answer>,
}

/// Login credentials sent to the service.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_follows_options() {
        let open = Question {
            id: 1,
            content: "Anything to add?".to_string(),
            min: 0,
            max: None,
            options: None,
        };
        assert!(!open.is_multiple_choice());
        assert!(!open.is_required());

        let mc = Question {
            id: 2,
            content: "Cat or dog?".to_string(),
            min: 1,
            max: None,
            options: Some(vec!["Cat".to_string(), "Dog".to_string()]),
        };
        assert!(mc.is_multiple_choice());
        assert!(mc.is_required());
        assert_eq!(mc.max_selections(), 1);
    }

    #[test]
    fn max_selections_never_below_one() {
        let q = Question {
            id: 3,
            content: "Pick some".to_string(),
            min: 0,
            max: Some(0),
            options: Some(vec!["a".to_string()]),
        };
        assert_eq!(q.max_selections(), 1);
    }

    #[test]
    fn answer_emptiness() {
        assert!(AnswerValue::Text("   ".to_string()).is_empty());
        assert!(!AnswerValue::Text("yes".to_string()).is_empty());
        assert!(AnswerValue::Choices(Vec::new()).is_empty());
        assert!(!AnswerValue::Choices(vec!["Cat".to_string()]).is_empty());
    }

    #[test]
    fn survey_deserializes_without_optional_fields() {
        let survey: Survey = serde_json::from_str(r#"{"id": 4, "title": "Pets"}"#).unwrap();
        assert_eq!(survey.id, 4);
        assert!(survey.questions.is_empty());
        assert_eq!(survey.respondents, 0);
    }

    #[test]
    fn reply_serializes_mixed_answers() {
        let reply = Reply {
            survey: 7,
            answers: vec![
                Answer {
                    question: 1,
                    value: AnswerValue::Text("fine".to_string()),
                },
                Answer {
                    question: 2,
                    value: AnswerValue::Choices(vec!["Cat".to_string()]),
                },
            ],
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["answers"][0]["value"], "fine");
        assert_eq!(json["answers"][1]["value"][0], "Cat");
    }
}
