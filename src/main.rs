use std::sync::Arc;

use task_board::{
    contact::{ContactDirectory, InMemoryContactDirectory, RemoteContactDirectory},
    routes::create_router,
    state::{AppState, Config},
    store::DocumentClient,
    task::{InMemoryTaskStore, RemoteTaskStore, TaskStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,task_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let (task_store, contact_directory): (Arc<dyn TaskStore>, Arc<dyn ContactDirectory>) =
        match &config.store_base_url {
            Some(base_url) => {
                tracing::info!("Using remote task store at {}", base_url);
                let client = DocumentClient::new(base_url.clone());
                (
                    Arc::new(RemoteTaskStore::new(client.clone())),
                    Arc::new(RemoteContactDirectory::new(client)),
                )
            }
            None => {
                tracing::warn!("STORE_BASE_URL not set, tasks are kept in memory only");
                (
                    Arc::new(InMemoryTaskStore::new()),
                    Arc::new(InMemoryContactDirectory::new(Vec::new())),
                )
            }
        };

    let addr = config.addr();
    let state = AppState::new(config, task_store, contact_directory);

    // Create router
    let app = create_router(state);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
