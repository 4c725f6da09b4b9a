mod handlers;
mod router;
mod state;

pub use router::create_router;
pub use state::AppState;

use crate::config::Config;
use crate::Result;

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    if config.assistant.api_key.trim().is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/chat will answer 401");
    }

    let addr = config.server_addr();
    let state = AppState::from_config(config)?;
    tracing::info!(
        model = %state.config().assistant.model,
        timeout_secs = state.config().assistant.timeout_secs,
        "assistant backend ready"
    );
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("signal lab server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| crate::Error::Config(e.to_string()))?;

    Ok(())
}
