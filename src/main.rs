use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use pv_tag_watcher::config::Config;
use pv_tag_watcher::core::client::kube_client::build_kube_client;
use pv_tag_watcher::core::provider::http_session::HttpSessionFactory;
use pv_tag_watcher::logging::init_logging;
use pv_tag_watcher::PvWatcher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let _guard = init_logging(&config.log_level)?;

    info!(
        provisioner = %config.provisioner_name,
        volume_type = %config.volume_type,
        "Starting pv-tag-watcher"
    );

    // No watch without a working client
    let client = build_kube_client().await.inspect_err(|e| {
        error!("Failed to create Kubernetes client: {:?}", e);
    })?;

    let sessions = Arc::new(HttpSessionFactory::new(
        reqwest::Client::new(),
        config.provider_url.clone(),
        config.provider_token.clone(),
        config.provider_type.clone(),
    ));

    let watcher = PvWatcher::new(
        client,
        &config.provisioner_name,
        &config.volume_type,
        sessions,
        config.pod_name.clone(),
    )
    .with_max_concurrent_tasks(config.max_concurrent_tasks);

    tokio::select! {
        _ = watcher.start() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    Ok(())
}
