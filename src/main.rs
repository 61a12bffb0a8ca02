use clap::Parser;
use course_catalog::catalog::bootstrap::{SeedSource, ensure_index, ensure_seeded};
use course_catalog::config::Config;
use course_catalog::elastic::client::ElasticClient;
use course_catalog::search::handlers::routes;
use course_catalog::search::router::SearchRouter;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        "Using Elasticsearch at {} (index '{}')",
        config.elasticsearch_url,
        config.index
    );

    // 1. Engine client (also the catalog store):
    let client = Arc::new(ElasticClient::new(
        &config.elasticsearch_url,
        &config.index,
        config.engine_timeout(),
        config.fetch_limit,
    ));

    // 2. Bootstrap, once, before accepting traffic:
    ensure_index(client.as_ref()).await?;
    let outcome = ensure_seeded(
        client.as_ref(),
        &SeedSource::File(config.seed_file.clone()),
    )
    .await?;
    tracing::info!("Bootstrap finished: {:?}", outcome);

    // 3. HTTP Router:
    let search = Arc::new(SearchRouter::new(client.clone(), client));
    let app = routes(search);

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
