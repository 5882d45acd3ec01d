use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("K8s API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Provider session error: {0}")]
    Session(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Helper for mapping any provider-side failure into a `WatcherError`
pub fn provider_error<E: ToString>(err: E) -> WatcherError {
    WatcherError::Provider(err.to_string())
}
