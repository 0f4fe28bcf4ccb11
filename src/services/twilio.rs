// src/services/twilio.rs
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("twilio request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("twilio api returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Thin wrapper around the Twilio Messages REST API.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    whatsapp_number: String,
}

impl TwilioClient {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            whatsapp_number: whatsapp_number.into(),
        }
    }

    /// Send an outbound WhatsApp message. `to` uses Twilio's
    /// `whatsapp:+1234567890` format. Returns the created message SID.
    pub async fn send_message(&self, to: &str, body: &str) -> Result<String, TwilioError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );
        let params = [
            ("From", self.whatsapp_number.as_str()),
            ("To", to),
            ("Body", body),
        ];

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TwilioError::Api {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let created: MessageCreated = response.json().await?;
        Ok(created.sid)
    }
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

/// Build the TwiML reply document Twilio expects from a webhook.
pub fn messaging_response(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(body)
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
