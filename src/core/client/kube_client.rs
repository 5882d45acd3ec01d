use kube::Client;
use tracing::debug;

use crate::errors::WatcherError;

/// Creates a Kubernetes client from the local kubeconfig or in-cluster config
pub async fn build_kube_client() -> Result<Client, WatcherError> {
    // KUBECONFIG / ~/.kube/config first, then the service account token
    let client = Client::try_default().await?;

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}
