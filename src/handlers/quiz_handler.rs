use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::QuizPayload,
};

#[post("/create/quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<QuizPayload>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(payload.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

// Registered ahead of `/quiz/{id}` so "all" is never read as an id.
#[get("/quiz/all")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id, &auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/quiz/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
    payload: web::Json<QuizPayload>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .update_quiz(&id, payload.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quiz/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_service.delete_quiz(&id, &auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(response))
}
