use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

use super::commands::CannedCommand;
use super::models::{MessagingEvent, WebhookPayload};
use super::{GatewayState, HEALTH_MESSAGE};

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// Echo the challenge back when the platform presents the configured token
pub async fn verify(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    if params.verify_token.as_deref() == Some(&*state.verify_token) {
        info!("Webhook verified (mode: {})", params.mode.as_deref().unwrap_or("-"));
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        info!("Rejected webhook verification with wrong token");
        (StatusCode::FORBIDDEN, "Invalid verification token").into_response()
    }
}

/// Handle every messaging event in the body, then acknowledge with 200
pub async fn receive(
    State(state): State<GatewayState>,
    Json(payload): Json<WebhookPayload>,
) -> (StatusCode, &'static str) {
    let request_id = Uuid::new_v4();
    let span = info_span!("webhook", %request_id);

    async {
        if !payload.is_page() {
            debug!("Ignoring webhook for object '{}'", payload.object);
            return;
        }

        for event in payload.events() {
            handle_event(&state, event).await;
        }
    }
    .instrument(span)
    .await;

    (StatusCode::OK, "ok")
}

async fn handle_event(state: &GatewayState, event: &MessagingEvent) {
    if event.sender.id.is_empty() {
        debug!("Skipping event without sender");
        return;
    }

    let Some(reply) = reply_for_event(state, event).await else {
        return;
    };
    if reply.is_empty() {
        return;
    }

    if let Err(e) = state.sender.send_text(&event.sender.id, &reply).await {
        error!("Failed to deliver reply to {}: {}", event.sender.id, e);
    }
}

/// Reply for one event, or `None` when the event needs no answer
pub(crate) async fn reply_for_event(state: &GatewayState, event: &MessagingEvent) -> Option<String> {
    if let Some(postback) = &event.postback {
        return CannedCommand::from_postback(&postback.payload).map(|c| c.reply().to_string());
    }

    let message = event.message.as_ref()?;
    if message.is_echo {
        return None;
    }
    let text = message.text.as_deref()?;

    if let Some(command) = CannedCommand::from_text(text) {
        info!("Answering {:?} command", command);
        return Some(command.reply().to_string());
    }

    Some(state.pipeline.reply_for(text).await)
}
