use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cookinator::auth::PasetoMaker;
use cookinator::database::PgStore;
use cookinator::routes;
use cookinator::state::AppState;

#[derive(Parser)]
#[command(name = "cookinator")]
#[command(about = "Cookinator API server - recipes, families and ingredients")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind, overrides SERVER_ADDRESS")]
    address: Option<String>,

    #[arg(long, help = "Do not apply database migrations on startup")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, TOKEN_SYMMETRIC_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cookinator=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = cookinator::config::config()
        .context("cannot load configuration")?
        .clone();
    if let Some(address) = cli.address {
        config.server.address = address;
    }
    if cli.skip_migrations {
        config.database.run_migrations = false;
    }
    tracing::info!("Starting Cookinator in {:?} mode", config.environment);

    config.validate().context("invalid configuration")?;
    let token_maker = PasetoMaker::new(config.security.token_symmetric_key.as_bytes())
        .context("cannot create token maker from TOKEN_SYMMETRIC_KEY")?;

    let store = PgStore::connect(&config.database)
        .await
        .context("cannot connect to database")?;
    if config.database.run_migrations {
        store.migrate().await.context("cannot run database migrations")?;
    }

    let address = config.server.address.clone();
    let state = AppState::new(Arc::new(store.clone()), Arc::new(token_maker), config);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
