mod chart;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod sliders;
mod state;
mod storage;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::AzureOpenAiClient;
use crate::routes::build_router;
use crate::sliders::SliderLoader;
use crate::state::AppState;
use crate::storage::{AssessmentStore, FileStore, KeyValueStore, RedisStore};
use crate::suggestions::SuggestionGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing AI credentials when enabled)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Competency API v{}", env!("CARGO_PKG_VERSION"));

    let loader = SliderLoader::new(config.data_dir.clone());
    info!("Competency data directory: {}", loader.data_dir().display());

    let store = build_store(&config)?;

    // Only build the AI client when suggestions are switched on
    let suggestions = if config.azure_openai.enabled {
        let client = AzureOpenAiClient::new(&config.azure_openai)?;
        info!("AI suggestions enabled (endpoint: {})", client.url());
        Some(SuggestionGenerator::new(Arc::new(client)))
    } else {
        info!("AI suggestions disabled");
        None
    };

    let state = AppState {
        config: config.clone(),
        loader,
        suggestions,
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is set, otherwise a local JSON file.
fn build_store(config: &Config) -> Result<AssessmentStore> {
    let backend: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            info!("Assessment store: Redis");
            Arc::new(RedisStore::open(url)?)
        }
        None => {
            let store = FileStore::new(config.store_path.clone());
            info!("Assessment store: {}", store.path().display());
            Arc::new(store)
        }
    };
    Ok(AssessmentStore::new(backend))
}
