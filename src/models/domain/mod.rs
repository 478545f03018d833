pub mod auth_session;
pub mod quiz;
pub mod quiz_question;
pub mod user;
pub use auth_session::AuthSession;
pub use quiz::Quiz;
pub use quiz_question::{QuizQuestion, QuizQuestionOption};
pub use user::User;
