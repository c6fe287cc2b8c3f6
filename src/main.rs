use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use slidegen_backend::{
    config::AppConfig,
    routes,
    services::{llm_client::AnthropicClient, session_manager::SessionManager},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    if config.anthropic_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; /chat and /generate-ppt will fail");
    }

    let llm = AnthropicClient::from_config(&config).context("building LLM client")?;
    let state = Arc::new(AppState::new(&config, Arc::new(llm)));
    spawn_session_reaper(state.sessions.clone());

    let app = routes::create_router()
        .with_state(state)
        .layer(routes::cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!("slide generator API listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn spawn_session_reaper(sessions: SessionManager) {
    let period = (sessions.ttl() / 4).max(std::time::Duration::from_secs(60));
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                tracing::info!(removed, "purged idle chat sessions");
            }
        }
    });
}
