use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use folio_core::{
    config::{data_file_from_env_value, default_title_from_env_value},
    constants::{DEFAULT_FRONTEND_DIR, DEFAULT_REST_ADDR},
    CoreConfig, PageService,
};

/// Main entry point for the Folio application
///
/// Serves the page REST API under `/api` and the editor front end on the same address.
///
/// # Environment Variables
/// - `FOLIO_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `FOLIO_DATA_FILE`: collection file (default: "data/pages.json")
/// - `FOLIO_DEFAULT_TITLE`: title for pages created without one (default: "Untitled")
/// - `FOLIO_FRONTEND_DIR`: directory holding `index.html` and assets (default: "frontend")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio_run=info".parse()?)
                .add_directive("folio_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("FOLIO_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let data_file = data_file_from_env_value(std::env::var("FOLIO_DATA_FILE").ok());
    let default_title = default_title_from_env_value(std::env::var("FOLIO_DEFAULT_TITLE").ok())?;
    let frontend_dir = std::env::var("FOLIO_FRONTEND_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FRONTEND_DIR));

    if !frontend_dir.join("index.html").is_file() {
        tracing::warn!(
            "front end not found at {}; only the API will be served",
            frontend_dir.display()
        );
    }

    let cfg = Arc::new(CoreConfig::new(data_file, default_title)?);

    tracing::info!("++ Starting Folio on {}", addr);
    tracing::info!("++ Collection file: {}", cfg.data_file().display());

    let app = api_rest::router(AppState::new(PageService::with_file_store(cfg)), &frontend_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
