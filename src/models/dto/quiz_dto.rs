use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Quiz, QuizQuestion, QuizQuestionOption};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizQuestionOptionDto {
	pub id: String,
	pub question_id: String,
	pub text: String,
	pub is_correct: bool,
}

impl QuizQuestionOptionDto {
	fn from_option(option: QuizQuestionOption, question_id: &str) -> Self {
		QuizQuestionOptionDto {
			id: option.id,
			question_id: question_id.to_string(),
			text: option.text,
			is_correct: option.is_correct,
		}
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizQuestionDto {
	pub id: String,
	pub quiz_id: String,
	pub text: String,
	pub options: Vec<QuizQuestionOptionDto>,
}

impl QuizQuestionDto {
	fn from_question(question: QuizQuestion, quiz_id: &str) -> Self {
		let question_id = question.id;
		let options = question
			.options
			.into_iter()
			.map(|option| QuizQuestionOptionDto::from_option(option, &question_id))
			.collect();

		QuizQuestionDto {
			id: question_id,
			quiz_id: quiz_id.to_string(),
			text: question.text,
			options,
		}
	}
}

/// Response shape of a quiz. Child entries carry their parent id even though
/// the stored document nests them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizDto {
	pub id: String,
	pub user_id: String,
	pub title: String,
	pub created_at: DateTime<Utc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub modified_at: Option<DateTime<Utc>>,
	pub questions: Vec<QuizQuestionDto>,
}

impl From<Quiz> for QuizDto {
	fn from(quiz: Quiz) -> Self {
		let quiz_id = quiz.id;
		let questions = quiz
			.questions
			.into_iter()
			.map(|question| QuizQuestionDto::from_question(question, &quiz_id))
			.collect();

		QuizDto {
			id: quiz_id,
			user_id: quiz.user_id,
			title: quiz.title,
			created_at: quiz.created_at,
			modified_at: quiz.modified_at,
			questions,
		}
	}
}
