pub mod auth_handler;
pub mod quiz_handler;
pub mod session_handler;
pub mod user_handler;

use actix_web::web;

use crate::errors::AppError;

/// Registers every route plus the body-extractor error handlers. Shared by the
/// server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(auth_handler::login)
    .service(auth_handler::logout)
    .service(auth_handler::register)
    .service(user_handler::get_user)
    .service(user_handler::health_check)
    .service(user_handler::health_check_ready)
    .service(user_handler::health_check_live)
    .service(quiz_handler::create_quiz)
    .service(quiz_handler::list_quizzes)
    .service(quiz_handler::get_quiz)
    .service(quiz_handler::update_quiz)
    .service(quiz_handler::delete_quiz)
    .service(session_handler::live_session);
}
