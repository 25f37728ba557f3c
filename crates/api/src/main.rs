use std::sync::Arc;

use anyhow::Context;

use skincart_api::config::ServerConfig;
use skincart_api::provider::HostedCheckoutProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skincart_observability::init();

    let config = ServerConfig::from_env();
    let provider = Arc::new(HostedCheckoutProvider::new(&config));
    let app = skincart_api::app::build_app(provider, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
