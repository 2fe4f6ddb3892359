use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Json, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{
    ClientEvent, IntentDecision, ProjectRecord, ProjectSummary, SaveProjectRequest, ServerEvent,
};
use tokio::sync::mpsc;

use crate::error::StoreError;
use crate::AppState;

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "remote_tier": state.dispatcher.resolver().has_remote(),
    }))
}

#[derive(Deserialize)]
pub struct ResolveRequest {
    pub text: String,
}

/// Resolve text without touching any session
pub async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> Json<IntentDecision> {
    Json(state.dispatcher.resolver().resolve(&request.text).await)
}

/// List projects, newest first
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectSummary>> {
    Json(state.store.list().await)
}

/// Create or update a project; connected sessions get the refreshed list
pub async fn save_project(
    State(state): State<AppState>,
    Json(request): Json<SaveProjectRequest>,
) -> Result<(StatusCode, Json<ProjectRecord>), StatusCode> {
    let created = request.id.is_none();
    let saved = state.dispatcher.save_project(request).await.map_err(|e| {
        tracing::error!("Save error: {}", e);
        match e {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    })?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(saved)))
}

/// Command channel over WebSocket
pub async fn ws(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel::<ClientEvent>();
    let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<ServerEvent>();
    tracing::info!("Builder connected");

    let writer = tokio::spawn(async move {
        while let Some(event) = outbox_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode event: {e}");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let session = tokio::spawn(
        state
            .dispatcher
            .clone()
            .serve_channel(inbox_rx, outbox_tx.clone()),
    );

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => {
                    if inbox_tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Unrecognized client message: {e}");
                    let _ = outbox_tx.send(ServerEvent::CopReply(
                        "I didn't understand that message.".into(),
                    ));
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    drop(inbox_tx);
    drop(outbox_tx);
    let _ = session.await;
    let _ = writer.await;
    tracing::info!("Builder disconnected");
}
