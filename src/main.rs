use tokio::net::TcpListener;
use tracing::info;
use dx_interpreter::{create_router, llm::build_adapter, utils::init_logger, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let llm = build_adapter(&config.llm);
    info!(provider = llm.provider_name(), model = %config.llm.model, "LLM adapter ready");

    // Create shared state
    let state = AppState { llm, config: config.clone() };

    // Create router
    let app = create_router(state);

    // Start server
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
