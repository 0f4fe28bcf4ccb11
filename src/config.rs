// src/config.rs
use anyhow::Context;
use std::env;

/// Process configuration, loaded once at startup from the environment
/// (a `.env` file is honored via dotenvy in `main`). The dispatch core never
/// reads the environment itself; everything it needs is passed in.
#[derive(Debug, Clone)]
pub struct Settings {
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_whatsapp_number: String,
    pub bot_name: String,
    pub admin_key: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .context("TWILIO_ACCOUNT_SID must be set")?,
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .context("TWILIO_AUTH_TOKEN must be set")?,
            twilio_whatsapp_number: env_or("TWILIO_WHATSAPP_NUMBER", "whatsapp:+14155238886"),
            bot_name: env_or("BOT_NAME", "Deep"),
            admin_key: env::var("ADMIN_KEY").context("ADMIN_KEY must be set")?,
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:3000"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
