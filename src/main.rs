use std::sync::Arc;
use studyguide::handlers::{router, AppState};
use studyguide::llm_wrapper::LLMClient;
use studyguide::logging::init_logging;
use studyguide::settings::Settings;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();

    let settings = Arc::new(Settings::new()?);
    if settings.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; completion requests will be rejected");
    }

    let llm = Arc::new(LLMClient::new(settings.clone()));
    let app = router(AppState::new(settings.clone(), llm));

    let listener = TcpListener::bind(&settings.bind_address).await?;
    info!(
        "Serving study guides on {} (model {}, cache {})",
        settings.bind_address, settings.model, settings.responses_file
    );
    axum::serve(listener, app).await?;

    Ok(())
}
