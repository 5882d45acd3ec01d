use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use crate::core::provider::session::{ProviderSession, SessionFactory, VolumeUpdater};
use crate::domain::volume::descriptor::VolumeDescriptor;
use crate::errors::provider_error;

/// Builds sessions against a REST block-storage endpoint.
pub struct HttpSessionFactory {
    client: Client,
    base_url: String,
    token: Option<String>,
    provider_type: String,
}

impl HttpSessionFactory {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        token: Option<String>,
        provider_type: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            provider_type: provider_type.into(),
        }
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    fn provider_type(&self) -> &str {
        &self.provider_type
    }

    async fn session(&self) -> Result<Option<Arc<dyn ProviderSession>>> {
        let session = HttpProviderSession {
            metadata: HttpVolumeUpdater {
                client: self.client.clone(),
                base_url: self.base_url.clone(),
                token: self.token.clone(),
                method: Method::PUT,
                path: "metadata",
            },
            tags: HttpVolumeUpdater {
                client: self.client.clone(),
                base_url: self.base_url.clone(),
                token: self.token.clone(),
                method: Method::PATCH,
                path: "tags",
            },
        };
        Ok(Some(Arc::new(session)))
    }
}

pub struct HttpProviderSession {
    metadata: HttpVolumeUpdater,
    tags: HttpVolumeUpdater,
}

#[async_trait]
impl VolumeUpdater for HttpProviderSession {
    async fn update_volume(&self, volume: &VolumeDescriptor) -> Result<()> {
        self.metadata.update_volume(volume).await
    }
}

impl ProviderSession for HttpProviderSession {
    fn tag_session(&self) -> &dyn VolumeUpdater {
        &self.tags
    }
}

struct HttpVolumeUpdater {
    client: Client,
    base_url: String,
    token: Option<String>,
    method: Method,
    path: &'static str,
}

impl HttpVolumeUpdater {
    fn url_for(&self, volume_id: &str) -> String {
        volume_url(&self.base_url, volume_id, self.path)
    }
}

#[async_trait]
impl VolumeUpdater for HttpVolumeUpdater {
    async fn update_volume(&self, volume: &VolumeDescriptor) -> Result<()> {
        let url = self.url_for(&volume.volume_id);
        debug!("{} {}", self.method, url);

        let mut request = self.client.request(self.method.clone(), &url).json(volume);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(provider_error(format!("{} {} returned {}: {}", self.method, url, status, body)).into())
    }
}

fn volume_url(base_url: &str, volume_id: &str, path: &str) -> String {
    format!(
        "{}/volumes/{}/{}",
        base_url,
        urlencoding::encode(volume_id),
        path
    )
}
