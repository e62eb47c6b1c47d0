//! Gallery controller
//!
//! Owns a [`GalleryState`] and carries out the I/O its commands ask for:
//! loading the catalog and icon listings, fetching SVG source for the
//! detail view, and the copy and download actions. Load failures are
//! logged and degrade to empty data; only copy and download report
//! failures to the user, as notifications.

use crate::{
    AppError, Command, Effect, GalleryLocation, GallerySource, GalleryState, IconsRequest,
    Notification, NOTIFICATION_DURATION,
};
use app_fs::{FileOperations, IconRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub struct GalleryController<S> {
    source: S,
    file_ops: Arc<dyn FileOperations>,
    state: GalleryState,
    download_dir: PathBuf,
    notification_duration: Duration,
}

impl<S: GallerySource> GalleryController<S> {
    pub fn new(source: S, file_ops: Arc<dyn FileOperations>, location: GalleryLocation) -> Self {
        Self {
            source,
            file_ops,
            state: GalleryState::new(location),
            download_dir: app_fs::default_download_dir(),
            notification_duration: NOTIFICATION_DURATION,
        }
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Load categories and metadata together, then the icons of the
    /// current selection
    pub async fn load(&mut self) {
        tracing::info!("Loading gallery for {}", self.state.selection().as_param());
        self.state.begin_catalog_load();

        let (categories, metadata) =
            futures::join!(self.source.categories(), self.source.metadata());

        let categories = categories.unwrap_or_else(|e| {
            tracing::warn!("Failed to load categories: {}", e);
            Vec::new()
        });
        let metadata = metadata.unwrap_or_else(|e| {
            tracing::warn!("Failed to load metadata: {}", e);
            Default::default()
        });
        self.state.finish_catalog_load(categories, metadata);

        let request = self.state.request_icons();
        self.load_icons(request).await;
    }

    /// Apply a command and run its effects. Returns the new location when
    /// the command moved the gallery somewhere else.
    pub async fn dispatch(&mut self, command: Command) -> Option<GalleryLocation> {
        let mut moved = None;

        for effect in self.state.apply(command) {
            match effect {
                Effect::LoadIcons(request) => {
                    self.load_icons(request).await;
                }
                Effect::LoadDetail(icon) => {
                    self.load_detail(icon).await;
                }
                Effect::Navigate(location) => {
                    tracing::debug!("Location: ?{}", location.to_query());
                    moved = Some(location);
                }
            }
        }

        moved
    }

    async fn load_icons(&mut self, request: IconsRequest) -> bool {
        let icons = match self.source.icons(&request.selection).await {
            Ok(icons) => icons,
            Err(e) => {
                tracing::warn!(
                    "Failed to load icons for {}: {}",
                    request.selection.as_param(),
                    e
                );
                Vec::new()
            }
        };
        self.state.finish_icons_load(request.token, icons)
    }

    async fn load_detail(&mut self, icon: IconRecord) {
        let code = match self.source.svg_text(&icon).await {
            Ok(code) => Some(code),
            Err(e) => {
                tracing::warn!("Failed to load SVG for {}/{}: {}", icon.category, icon.name, e);
                None
            }
        };
        self.state.finish_detail_load(&icon, code);
    }

    /// Put the icon's SVG markup on the clipboard
    pub async fn copy(&mut self, icon: &IconRecord) -> Result<(), AppError> {
        let result = match self.source.svg_text(icon).await {
            Ok(text) => self
                .file_ops
                .copy_text_to_clipboard(&text)
                .map_err(AppError::from),
            Err(e) => Err(e),
        };

        let notification = match &result {
            Ok(()) => Notification::success(format!("Copied {} to clipboard", icon.file_name())),
            Err(e) => Notification::error(format!(
                "Failed to copy {}: {}",
                icon.file_name(),
                e.user_message()
            )),
        };
        self.notify(notification);
        result
    }

    /// Save the icon as `<name>.svg` in the download directory
    pub async fn download(&mut self, icon: &IconRecord) -> Result<PathBuf, AppError> {
        let result = match self.source.svg_bytes(icon).await {
            Ok(bytes) => self
                .file_ops
                .save_file(&self.download_dir, &icon.file_name(), &bytes)
                .map_err(AppError::from),
            Err(e) => Err(e),
        };

        let notification = match &result {
            Ok(path) => Notification::success(format!("Saved {}", path.display())),
            Err(e) => Notification::error(format!(
                "Failed to download {}: {}",
                icon.file_name(),
                e.user_message()
            )),
        };
        self.notify(notification);
        result
    }

    fn notify(&mut self, notification: Notification) {
        self.state
            .notify(notification.with_duration(self.notification_duration));
    }

    /// Look up an icon by category and name, listing the category if the
    /// current listing does not hold it
    pub async fn find_icon(&self, category: &str, name: &str) -> Option<IconRecord> {
        if let Some(icon) = self.state.find_icon(category, name) {
            return Some(icon.clone());
        }

        let selection = crate::CategorySelection::Category(category.to_string());
        match self.source.icons(&selection).await {
            Ok(icons) => icons.into_iter().find(|icon| icon.name == name),
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", category, e);
                None
            }
        }
    }
}
