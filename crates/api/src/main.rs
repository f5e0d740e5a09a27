use std::sync::Arc;

use anyhow::Context;

use cadastro_api::app::{build_app, AppServices};
use cadastro_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    cadastro_observability::tracing::init(config.log_format);

    let services = AppServices::from_config(&config)
        .await
        .context("failed to initialize pessoa repository")?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
