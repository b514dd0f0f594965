use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_rewrite_service::{AppConfig, CompletionGateway, HttpTransport, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!(?config.listen_addr, endpoint = %config.endpoint, model = %config.model, "starting content rewrite service");
    if config.api_token.is_none() {
        tracing::warn!("HF_TOKEN is not set; optimize requests will fail until it is configured");
    }

    let transport = Arc::new(HttpTransport::new(config.endpoint.clone()));
    let gateway = Arc::new(CompletionGateway::new(config.clone(), transport));
    let router = build_router(gateway);

    let listener = TcpListener::bind(config.listen_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "REST server ready");

    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,hyper=warn,axum::rejection=trace".into());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
