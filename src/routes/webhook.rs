use axum::{
    Json,
    extract::{Form, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{IncomingMessage, SendRequest, SendResponse, TwilioWebhook},
    services::{metrics_manager::MetricsData, twilio::messaging_response},
    state::SharedState,
};

/// Handle an inbound WhatsApp message from Twilio.
///
/// Never fails for any payload content: a missing or empty `Body` dispatches
/// like any other text and resolves to the fallback reply.
pub async fn webhook_handler(
    State(state): State<SharedState>,
    Form(payload): Form<TwilioWebhook>,
) -> Response {
    let request_id = Uuid::new_v4();
    let message = IncomingMessage::from(payload);

    tracing::info!(
        %request_id,
        sender = message.sender.as_deref().unwrap_or("unknown"),
        "incoming whatsapp message"
    );

    let (intent, reply) = state.dispatcher.dispatch_with_intent(&message.body);
    state.metrics.record_intent(intent.name()).await;

    tracing::info!(%request_id, intent = intent.name(), "sending reply");

    (
        [(header::CONTENT_TYPE, "application/xml")],
        messaging_response(&reply),
    )
        .into_response()
}

pub async fn health_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "bot": state.dispatcher.bot_info(),
        "service": "whatsapp-bot-backend",
    }))
}

pub async fn home_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("¡Hola! Soy {}, tu bot colombiano.", state.dispatcher.bot_info().name),
        "endpoints": {
            "webhook": "/webhook (POST)",
            "health": "/health (GET)",
            "metrics": "/admin/metrics (GET, requires x-admin-key)",
            "send": "/admin/send (POST, requires x-admin-key)",
        },
        "instructions": "Configure your Twilio webhook to point to /webhook",
    }))
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}

/// Send an outbound WhatsApp message through the Twilio REST API.
pub async fn send_message_handler(
    State(state): State<SharedState>,
    Json(payload): Json<SendRequest>,
) -> Result<Json<SendResponse>, AppError> {
    if payload.to.trim().is_empty() {
        return Err(AppError::BadRequest("`to` cannot be empty".to_string()));
    }
    let Some(twilio) = &state.twilio else {
        return Err(AppError::Internal("twilio client not configured".to_string()));
    };

    let sid = twilio.send_message(&payload.to, &payload.body).await?;
    tracing::info!(to = %payload.to, %sid, "outbound message sent");
    Ok(Json(SendResponse { sid }))
}
