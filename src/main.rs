use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use anuvad::config::Config;
use anuvad::dictionary::Dictionary;
use anuvad::provider::{GoogleTranslateProvider, TranslationProvider};
use anuvad::resolver::Translator;
use anuvad::routes::{self, AppState};
use anuvad::store::TranslationLog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse()?),
        )
        .init();

    let provider: Option<Arc<dyn TranslationProvider>> = if config.no_provider {
        info!("external translation provider disabled, using dictionary only");
        None
    } else {
        match GoogleTranslateProvider::from_env() {
            Ok(provider) => {
                info!("external translation provider: {}", provider.name());
                Some(Arc::new(provider))
            }
            Err(err) => {
                warn!("external translation provider unavailable: {}", err);
                None
            }
        }
    };

    let translator = Arc::new(Translator::new(Dictionary::builtin(), provider));
    let log = Arc::new(TranslationLog::new(&config.database_path));
    if let Err(err) = log.initialize().await {
        warn!("durable log store unavailable, continuing with in-memory logging: {}", err);
    }

    let state = AppState {
        translator,
        log: log.clone(),
    };
    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    log.close().await;
    Ok(())
}
