// src/state.rs
use std::sync::Arc;

use crate::services::chatbot::IntentDispatcher;
use crate::services::metrics_manager::MetricsManager;
use crate::services::twilio::TwilioClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub dispatcher: IntentDispatcher,
    pub metrics: MetricsManager,
    pub twilio: Option<TwilioClient>,
    pub admin_key: String,
}

impl AppState {
    pub fn new(
        dispatcher: IntentDispatcher,
        twilio: Option<TwilioClient>,
        admin_key: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            metrics: MetricsManager::new(),
            twilio,
            admin_key: admin_key.into(),
        }
    }
}
