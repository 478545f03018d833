use std::sync::Arc;

use actix_web::{get, rt, web, Error, HttpRequest, HttpResponse};
use actix_ws::Message;
use uuid::Uuid;

use crate::{app_state::AppState, auth::OptionalUser};

/// Live session channel. Each upgraded socket is registered under a fresh
/// connection id for as long as it stays open.
#[get("/ws")]
pub async fn live_session(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
    current: OptionalUser,
) -> Result<HttpResponse, Error> {
    let (response, mut session, mut messages) = actix_ws::handle(&req, body)?;

    let connection_id = Uuid::new_v4().to_string();
    let registry = Arc::clone(&state.session_registry);
    registry
        .connect(&connection_id, current.0.map(|claims| claims.sub))
        .await;

    let greeting = serde_json::json!({
        "event": "connected",
        "connection_id": connection_id,
    })
    .to_string();

    rt::spawn(async move {
        if session.text(greeting).await.is_ok() {
            let close_reason = loop {
                match messages.recv().await {
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break None;
                        }
                    }
                    Some(Ok(Message::Close(reason))) => break reason,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        log::warn!("Protocol error on connection {}: {}", connection_id, err);
                        break None;
                    }
                    None => break None,
                }
            };
            let _ = session.close(close_reason).await;
        }

        registry.disconnect(&connection_id).await;
    });

    Ok(response)
}
