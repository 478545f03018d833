use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizQuestionOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl QuizQuestion {
    pub fn new(text: &str, options: Vec<QuizQuestionOption>) -> Self {
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            options,
        }
    }
}

impl QuizQuestionOption {
    pub fn new(text: &str, is_correct: bool) -> Self {
        QuizQuestionOption {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_correct,
        }
    }
}
