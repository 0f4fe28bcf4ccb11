pub mod chatbot;
pub mod metrics_manager;
pub mod personality;
pub mod twilio;
