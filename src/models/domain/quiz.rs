use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::QuizQuestion;

/// A quiz document. Questions and their options are embedded, so the whole
/// subtree is written and deleted as one document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String, // Owner, checked on every access
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// Bumped by every successful write; updates only land on the version
    /// they were computed from.
    #[serde(default)]
    pub version: i64,
}

impl Quiz {
    pub fn new(user_id: &str, title: &str, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            questions,
            created_at: Utc::now(),
            modified_at: None,
            version: 0,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz_question::QuizQuestionOption;

    #[test]
    fn new_quiz_gets_fresh_id_and_owner() {
        let question = QuizQuestion::new("Q1", vec![QuizQuestionOption::new("A", true)]);
        let first = Quiz::new("user-1", "T1", vec![question.clone()]);
        let second = Quiz::new("user-1", "T1", vec![question]);

        assert_ne!(first.id, second.id);
        assert!(first.is_owned_by("user-1"));
        assert!(!first.is_owned_by("user-2"));
        assert!(first.modified_at.is_none());
        assert_eq!(first.version, 0);
    }

    #[test]
    fn quiz_round_trip_serialization_keeps_nested_tree() {
        let quiz = Quiz::new(
            "user-1",
            "Capitals",
            vec![QuizQuestion::new(
                "Capital of France?",
                vec![
                    QuizQuestionOption::new("Paris", true),
                    QuizQuestionOption::new("Lyon", false),
                ],
            )],
        );

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(parsed, quiz);
        assert_eq!(parsed.questions[0].options.len(), 2);
    }

    #[test]
    fn documents_without_version_load_as_version_zero() {
        let json = r#"{"id":"q1","user_id":"u1","title":"T","questions":[],"created_at":"2024-01-01T00:00:00Z"}"#;
        let parsed: Quiz = serde_json::from_str(json).expect("quiz should deserialize");

        assert_eq!(parsed.version, 0);
    }
}
