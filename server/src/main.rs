mod api;
mod auth;
mod catalog;
mod config;
mod db;
mod models;
mod policy;
mod schema;
mod seed;
mod telemetry;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use clap::Parser;
use config::{Cli, Command};
use std::net::SocketAddr;
use std::sync::Arc;

/// Application state shared across all handlers
pub type AppState = Arc<db::DbPool>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.subcommand() {
        Command::Openapi => {
            println!("{}", api::openapi().to_pretty_json()?);
            Ok(())
        }
        Command::Seed => {
            let _telemetry = telemetry::init_telemetry()?;
            run_seed(&cli.database_url)
        }
        Command::Serve => {
            let _telemetry = telemetry::init_telemetry()?;
            serve(&cli.database_url, cli.bind).await
        }
    }
}

fn run_seed(database_url: &str) -> anyhow::Result<()> {
    let pool = db::create_pool(database_url)?;
    let mut conn = pool.get().context("Failed to get database connection")?;
    let summary = seed::run(&mut conn).context("Seeding failed")?;

    println!(
        "Seeded {} recipes, {} ingredients, {} links",
        summary.recipes, summary.ingredients, summary.links
    );
    Ok(())
}

async fn serve(database_url: &str, bind: SocketAddr) -> anyhow::Result<()> {
    let pool: AppState = Arc::new(db::create_pool(database_url)?);
    let app = api::app(pool);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    let addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
