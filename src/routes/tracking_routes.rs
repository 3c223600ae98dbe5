//! Feed de tracking en tiempo real
//!
//! Dos formas de conexión sobre el mismo canal: un stream SSE de una sola
//! dirección y una sesión WebSocket. Ambas entregan el mismo payload
//! `{timestamp, vehicles}` en cada tick del broadcaster. La baja de un
//! viewer se detecta por el fallo de escritura o el cierre del cliente,
//! nunca hace falta un unsubscribe explícito.

use std::convert::Infallible;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::stream::Stream;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::services::broadcast_service::{TrackingChannel, TRACKING_EVENT};
use crate::state::AppState;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new()
        .route("/stream", get(stream_tracking))
        .route("/socket", get(socket_tracking))
}

/// Stream SSE: un evento `data:` por tick hasta que el cliente corta
async fn stream_tracking(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.tracking.subscribe();
    debug!(
        "Viewer SSE conectado ({} viewers)",
        state.tracking.viewer_count()
    );

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(frame) => match serde_json::to_string(&frame) {
                    Ok(json) => return Some((Ok(Event::default().data(json)), rx)),
                    // Frame no serializable: se descarta y se espera el siguiente
                    Err(_) => continue,
                },
                // Viewer rezagado: pierde los ticks intermedios y sigue
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Sesión WebSocket: cada tick se empuja como mensaje de texto con el
/// evento nombrado. Los mensajes entrantes del cliente se drenan y se
/// ignoran; el core no define mensajes de control.
async fn socket_tracking(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let channel = state.tracking.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, channel))
}

async fn handle_socket(socket: WebSocket, channel: TrackingChannel) {
    let mut rx = channel.subscribe();
    let (mut sender, mut receiver) = socket.split();
    debug!("Viewer socket conectado ({} viewers)", channel.viewer_count());

    loop {
        tokio::select! {
            frame = rx.recv() => {
                match frame {
                    Ok(frame) => {
                        let payload = serde_json::json!({
                            "event": TRACKING_EVENT,
                            "timestamp": frame.timestamp,
                            "vehicles": frame.vehicles,
                        });
                        let Ok(text) = serde_json::to_string(&payload) else {
                            continue;
                        };
                        // Fallo de escritura: el viewer se da de baja aquí
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    debug!(
        "Viewer socket desconectado ({} viewers)",
        channel.viewer_count().saturating_sub(1)
    );
}
