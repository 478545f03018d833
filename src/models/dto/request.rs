use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.-]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

/// Form body of `POST /login`. Fields are optional so that a missing field
/// produces the same message as the login flow rather than a decoder error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    pub fn credentials(self) -> AppResult<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::BadRequest(
                "username or password is missing".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegisterForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterForm {
    pub fn into_request(self) -> AppResult<RegisterUserRequest> {
        match (self.username, self.email, self.password) {
            (Some(username), Some(email), Some(password)) => Ok(RegisterUserRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
            }),
            _ => Err(AppError::BadRequest(
                "username, email, or password is missing".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, max = 64))]
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username may only contain letters, digits, '.', '-' and '_'"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"), length(max = 120))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
}

/// Quiz-level payload shared by create (`POST /create/quiz`) and update
/// (`PUT /quiz/{id}`). Which keys are mandatory depends on the mode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuizPayload {
    pub title: Option<String>,
    pub questions: Option<Vec<QuestionPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuestionPayload {
    pub id: Option<String>,
    pub text: Option<String>,
    pub options: Option<Vec<OptionPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OptionPayload {
    pub id: Option<String>,
    pub text: Option<String>,
    pub is_correct: Option<bool>,
}
