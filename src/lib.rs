pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

use std::path::Path;
use std::sync::Arc;

// Export API types
pub use api::handlers;
pub use api::routes;
pub use api::{AppContext, AppState};

// Export logic types
pub use logic::{MovieValidator, SchemaValidator, ValidationError, ValidationErrors};

// Export all model types
pub use model::*;

// Export store types
pub use store::{InMemoryStore, MovieStore};

/// Build the full application from configuration: seed movies, store and router
pub fn build_app(config: &config::AppConfig) -> anyhow::Result<axum::Router> {
    let validator = Arc::new(SchemaValidator::new());

    let seed_path = config.seed.path.as_deref().map(Path::new);
    let movies = seed::load_seed_movies(seed_path, validator.as_ref())?;
    log::info!("Loaded {} seed movies", movies.len());

    let store = InMemoryStore::with_movies(movies)?;
    Ok(app_with_store(store, validator, &config.cors))
}

/// Wire a router around an explicit store and validator
pub fn app_with_store<S: MovieStore + 'static>(
    store: S,
    validator: Arc<dyn MovieValidator>,
    cors: &config::CorsConfig,
) -> axum::Router {
    routes::create_router::<S>(cors).with_state(Arc::new(AppContext::new(store, validator)))
}

/// Load `.env`, logging and configuration, then serve until shutdown
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level unless RUST_LOG says otherwise
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = crate::config::AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}, {} allowed origins",
        config.server.host,
        config.server.port,
        config.cors.allowed_origins.len()
    );
    let app = build_app(&config)?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("server listening on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
