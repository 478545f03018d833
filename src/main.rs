use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizhub_server::{
    app_state::AppState, auth::AuthMiddleware, config::Config, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config
            .validate_for_production()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("starting HTTP server on {}:{}", host, port);
    log::info!("live session channel: ws://{}:{}/ws", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(AuthMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors(&state.config.cors_allowed_origins))
            .wrap(Logger::new(r#"%a "%r" %s %b %Dms req=%{x-request-id}o"#))
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
