use anyhow::Context;
use tracing::{info, warn};

use photoreport_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    photoreport_observability::init(config.log_format);

    if config.insecure_secret {
        warn!("JWT_SECRET not set; using insecure dev default");
    }
    info!(
        permission_check = ?config.permission_check,
        token_expires_in_secs = config.token_expires_in_secs,
        "starting"
    );

    let app = photoreport_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
