use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use web::{
    app,
    config::Config,
    middleware::auth::ApiKeys,
    mirror::{DisabledMirror, GoogleSheetMirror, SheetMirror},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Utsavam registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let mirror: Arc<dyn SheetMirror> = match &config.sheet_webapp_url {
        Some(url) => {
            tracing::info!("Mirroring to review sheet, timeout {:?}", config.sheet_timeout);
            Arc::new(
                GoogleSheetMirror::new(url.clone(), config.sheet_timeout)
                    .context("Failed to build sheet client")?,
            )
        }
        None => {
            tracing::warn!("GOOGLE_SHEET_WEBAPP_URL not set, sheet mirroring disabled");
            Arc::new(DisabledMirror)
        }
    };

    let state = AppState::new(Arc::new(db), mirror);
    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(state, api_keys))
        .await
        .context("Server error")?;

    Ok(())
}
