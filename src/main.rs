use anyhow::{Context, Result};
use bilingual_content::config::Config;
use bilingual_content::server::{create_router, AppState};
use bilingual_content::LocalizeOptions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilingual_content=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        mode = %config.display_mode,
        sanitize = config.sanitize_text,
        max_depth = config.max_depth,
        "Loaded configuration"
    );

    let app = create_router(AppState::new(LocalizeOptions::from(&config)));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
