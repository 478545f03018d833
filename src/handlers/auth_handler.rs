use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, OptionalUser},
    errors::AppError,
    models::dto::request::{LoginForm, RegisterForm},
};

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.login(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.logout(&auth.0).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
    current: OptionalUser,
) -> Result<HttpResponse, AppError> {
    if current.0.is_some() {
        return Err(AppError::BadRequest("logout required".to_string()));
    }

    let user = state.user_service.register(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}
