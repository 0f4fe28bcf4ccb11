// src/message.rs
use serde::{Deserialize, Serialize};

/// The form-encoded payload Twilio POSTs to the webhook. Only the fields the
/// bot cares about; everything else in the callback is ignored.
#[derive(Debug, Deserialize)]
pub struct TwilioWebhook {
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
}

/// Ephemeral per-request message, discarded after dispatch.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub body: String,
    pub sender: Option<String>,
}

impl From<TwilioWebhook> for IncomingMessage {
    fn from(payload: TwilioWebhook) -> Self {
        Self {
            body: payload.body.unwrap_or_default(),
            sender: payload.from,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub to: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub sid: String,
}
