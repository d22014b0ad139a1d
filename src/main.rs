use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipemate::accounts::AccountService;
use recipemate::catalog::Catalog;
use recipemate::config::Config;
use recipemate::db::{self, AccountRepository, SqliteDocumentStore};
use recipemate::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RecipeMate Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (RECIPEMATE_API_PSK). API key check is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let store = Arc::new(SqliteDocumentStore::new(pool.clone()));
    let accounts = AccountService::new(AccountRepository::new(pool), config.session_ttl_days);

    let purged = accounts.purge_expired_sessions().await?;
    if purged > 0 {
        tracing::info!("Purged {} expired sessions", purged);
    }

    let catalog = Catalog::sample();
    tracing::info!("Recipe catalog loaded with {} recipes", catalog.len());

    // Create application state
    let state = AppState {
        store,
        accounts,
        catalog: Arc::new(catalog),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
