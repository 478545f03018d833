pub mod auth_session_repository;
pub mod quiz_repository;
pub mod user_repository;

pub use auth_session_repository::{AuthSessionRepository, MongoAuthSessionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
