use std::collections::HashMap;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Quiz, QuizQuestion, QuizQuestionOption};
use crate::models::dto::request::{OptionPayload, QuestionPayload, QuizPayload};

/// Builds and merges quiz trees from client payloads.
///
/// Create mode (`build_*`) requires every mandatory key at each level and
/// builds children before their parent, so a failure anywhere in the tree
/// returns before anything is constructed. Update mode (`apply_*`) only
/// touches keys present in the payload and matches children by id. Callers
/// run updates against a working copy and persist it only on success.
pub struct QuizReconciler;

impl QuizReconciler {
    pub fn build_quiz(payload: QuizPayload, user_id: &str) -> AppResult<Quiz> {
        let (title, questions) = match (non_blank(payload.title), payload.questions) {
            (Some(title), Some(questions)) => (title, questions),
            _ => {
                return Err(AppError::ValidationError(
                    "Title and questions are required".to_string(),
                ))
            }
        };
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "At least 1 question is required".to_string(),
            ));
        }

        let questions = questions
            .into_iter()
            .map(Self::build_question)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Quiz::new(user_id, &title, questions))
    }

    pub fn build_question(payload: QuestionPayload) -> AppResult<QuizQuestion> {
        let (text, options) = match (non_blank(payload.text), payload.options) {
            (Some(text), Some(options)) => (text, options),
            _ => {
                return Err(AppError::ValidationError(
                    "Text and options are required".to_string(),
                ))
            }
        };
        if options.is_empty() {
            return Err(AppError::ValidationError(
                "At least 1 option is required".to_string(),
            ));
        }

        let options = options
            .into_iter()
            .map(Self::build_option)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(QuizQuestion::new(&text, options))
    }

    pub fn build_option(payload: OptionPayload) -> AppResult<QuizQuestionOption> {
        match (non_blank(payload.text), payload.is_correct) {
            (Some(text), Some(is_correct)) => Ok(QuizQuestionOption::new(&text, is_correct)),
            _ => Err(AppError::ValidationError(
                "Option text and is_correct are required".to_string(),
            )),
        }
    }

    pub fn apply_quiz(quiz: &mut Quiz, payload: QuizPayload) -> AppResult<()> {
        if let Some(title) = payload.title {
            quiz.title = require_text(title, "Title cannot be empty")?;
        }

        if let Some(questions) = payload.questions {
            let index = index_by_id(quiz.questions.iter().map(|q| q.id.as_str()));

            for question in questions {
                match question.id.clone() {
                    None => quiz.questions.push(Self::build_question(question)?),
                    Some(id) => {
                        let position = *index.get(&id).ok_or_else(|| {
                            AppError::ValidationError("Question id is invalid.".to_string())
                        })?;
                        Self::apply_question(&mut quiz.questions[position], question)?;
                    }
                }
            }
        }

        quiz.touch();
        Ok(())
    }

    pub fn apply_question(question: &mut QuizQuestion, payload: QuestionPayload) -> AppResult<()> {
        if let Some(text) = payload.text {
            question.text = require_text(text, "Text cannot be empty")?;
        }

        if let Some(options) = payload.options {
            let index = index_by_id(question.options.iter().map(|o| o.id.as_str()));

            for option in options {
                match option.id.clone() {
                    None => question.options.push(Self::build_option(option)?),
                    Some(id) => {
                        let position = *index.get(&id).ok_or_else(|| {
                            AppError::ValidationError("Option id is invalid.".to_string())
                        })?;
                        Self::apply_option(&mut question.options[position], option)?;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn apply_option(option: &mut QuizQuestionOption, payload: OptionPayload) -> AppResult<()> {
        if let Some(text) = payload.text {
            option.text = require_text(text, "Text cannot be empty")?;
        }
        if let Some(is_correct) = payload.is_correct {
            option.is_correct = is_correct;
        }
        Ok(())
    }
}

// Positions are taken before any child is appended, so new children never
// shadow existing ones.
fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    ids.enumerate()
        .map(|(position, id)| (id.to_string(), position))
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_text(value: String, message: &str) -> AppResult<String> {
    non_blank(Some(value)).ok_or_else(|| AppError::ValidationError(message.to_string()))
}
