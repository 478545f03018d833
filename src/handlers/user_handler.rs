use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser, // Require authentication
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = match &state.db {
        Some(db) => db.health_check().await.map(|_| "ok"),
        None => Ok("not_configured"),
    };

    let response = serde_json::json!({
        "status": if db_health.is_ok() { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "live_connections": state.session_registry.len().await,
        "database": state.db.as_ref().map(|db| db.name()),
        "dependencies": {
            "mongodb": db_health.as_ref().copied().unwrap_or("error")
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
