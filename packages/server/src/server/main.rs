// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use imagekit::{ImageKitOptions, ImageKitService};
use server_core::kernel::{ImageKitAdapter, ResendEmailClient, ServerDeps};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CRM API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Assemble dependencies
    let imagekit = Arc::new(ImageKitService::new(ImageKitOptions {
        private_key: config.imagekit_private_key,
        public_key: config.imagekit_public_key,
        url_endpoint: config.imagekit_url_endpoint,
    }));
    let email = Arc::new(ResendEmailClient::new(
        config.resend_api_key,
        config.email_from_address,
    ));
    let deps = Arc::new(ServerDeps::new(
        pool,
        Arc::new(ImageKitAdapter::new(imagekit)),
        email,
        config.marketplace_email,
    ));

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
