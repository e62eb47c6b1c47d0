//! Gallery source backed by a running gallery server

use app_core::{AppError, CategorySelection, GallerySource};
use app_fs::{IconRecord, Metadata};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Reads the gallery over HTTP
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of an icon asset; every path segment is percent-encoded
    fn asset_url(&self, icon: &IconRecord) -> String {
        let path: Vec<_> = icon
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        self.url(&path.join("/"))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, AppError> {
        tracing::debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(remote_error)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.get(&self.url(path))
            .await?
            .json()
            .await
            .map_err(remote_error)
    }
}

fn remote_error(e: reqwest::Error) -> AppError {
    AppError::Remote(e.to_string())
}

#[async_trait]
impl GallerySource for RemoteSource {
    async fn categories(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/api/categories").await
    }

    async fn metadata(&self) -> Result<Metadata, AppError> {
        self.get_json("/api/metadata").await
    }

    async fn icons(&self, selection: &CategorySelection) -> Result<Vec<IconRecord>, AppError> {
        let path = format!(
            "/api/icons?category={}",
            urlencoding::encode(selection.as_param())
        );
        self.get_json(&path).await
    }

    async fn svg_text(&self, icon: &IconRecord) -> Result<String, AppError> {
        self.get(&self.asset_url(icon))
            .await?
            .text()
            .await
            .map_err(remote_error)
    }

    async fn svg_bytes(&self, icon: &IconRecord) -> Result<Vec<u8>, AppError> {
        let bytes = self
            .get(&self.asset_url(icon))
            .await?
            .bytes()
            .await
            .map_err(remote_error)?;
        Ok(bytes.to_vec())
    }
}
