use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use whatsapp_bot_backend::config::Settings;
use whatsapp_bot_backend::routes;
use whatsapp_bot_backend::services::chatbot::IntentDispatcher;
use whatsapp_bot_backend::services::personality::PersonalityStore;
use whatsapp_bot_backend::services::twilio::TwilioClient;
use whatsapp_bot_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let settings = Settings::from_env()?;

    // Personality data is validated here; invalid packs abort startup.
    let store = Arc::new(PersonalityStore::colombian(&settings.bot_name)?);
    let dispatcher = IntentDispatcher::new(store)?;

    let twilio = TwilioClient::new(
        &settings.twilio_account_sid,
        &settings.twilio_auth_token,
        &settings.twilio_whatsapp_number,
    );

    let state = Arc::new(AppState::new(dispatcher, Some(twilio), &settings.admin_key));

    let app = routes::create_router(state).layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("whatsapp bot listening on {}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
