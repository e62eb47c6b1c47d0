//! Where the gallery gets its data from

use crate::{AppError, CategorySelection};
use app_fs::{IconRecord, IconStore, Metadata};
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to categories, metadata, icon listings and SVG files
#[async_trait]
pub trait GallerySource: Send + Sync {
    async fn categories(&self) -> Result<Vec<String>, AppError>;

    async fn metadata(&self) -> Result<Metadata, AppError>;

    async fn icons(&self, selection: &CategorySelection) -> Result<Vec<IconRecord>, AppError>;

    /// Raw SVG markup of an icon
    async fn svg_text(&self, icon: &IconRecord) -> Result<String, AppError>;

    /// SVG file contents, as saved by downloads
    async fn svg_bytes(&self, icon: &IconRecord) -> Result<Vec<u8>, AppError>;
}

#[async_trait]
impl<T: GallerySource + ?Sized> GallerySource for Box<T> {
    async fn categories(&self) -> Result<Vec<String>, AppError> {
        (**self).categories().await
    }

    async fn metadata(&self) -> Result<Metadata, AppError> {
        (**self).metadata().await
    }

    async fn icons(&self, selection: &CategorySelection) -> Result<Vec<IconRecord>, AppError> {
        (**self).icons(selection).await
    }

    async fn svg_text(&self, icon: &IconRecord) -> Result<String, AppError> {
        (**self).svg_text(icon).await
    }

    async fn svg_bytes(&self, icon: &IconRecord) -> Result<Vec<u8>, AppError> {
        (**self).svg_bytes(icon).await
    }
}

/// Reads the icon store on this machine
#[derive(Debug, Clone)]
pub struct LocalSource {
    store: Arc<IconStore>,
}

impl LocalSource {
    pub fn new(store: IconStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &IconStore {
        &self.store
    }

    /// Run blocking store work off the async runtime
    async fn blocking<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&IconStore) -> Result<T, AppError> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| AppError::Store(format!("store task failed: {}", e)))?
    }

    fn locate(store: &IconStore, icon: &IconRecord) -> Result<std::path::PathBuf, AppError> {
        store
            .icon_file(&icon.category, &icon.name)
            .filter(|path| path.is_file())
            .ok_or_else(|| AppError::NotFound(format!("{}/{}", icon.category, icon.name)))
    }
}

#[async_trait]
impl GallerySource for LocalSource {
    async fn categories(&self) -> Result<Vec<String>, AppError> {
        self.blocking(|store| Ok(store.list_categories()?)).await
    }

    async fn metadata(&self) -> Result<Metadata, AppError> {
        self.blocking(|store| Ok(store.resolve_metadata()?)).await
    }

    async fn icons(&self, selection: &CategorySelection) -> Result<Vec<IconRecord>, AppError> {
        let category = selection.category().map(str::to_string);
        self.blocking(move |store| Ok(store.list_icons(category.as_deref())?))
            .await
    }

    async fn svg_text(&self, icon: &IconRecord) -> Result<String, AppError> {
        let icon = icon.clone();
        self.blocking(move |store| {
            let path = Self::locate(store, &icon)?;
            Ok(std::fs::read_to_string(path)?)
        })
        .await
    }

    async fn svg_bytes(&self, icon: &IconRecord) -> Result<Vec<u8>, AppError> {
        let icon = icon.clone();
        self.blocking(move |store| {
            let path = Self::locate(store, &icon)?;
            Ok(std::fs::read(path)?)
        })
        .await
    }
}
