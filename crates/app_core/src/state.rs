//! Gallery state management
//!
//! Holds everything the gallery has loaded plus the user's view settings,
//! and turns [`Command`]s into [`Effect`]s for the controller. Loads never
//! put the state into an error phase: failures arrive as empty data.

use crate::gallery::{derive_view, GalleryView};
use crate::{
    CategorySelection, Command, Effect, GalleryLocation, IconsRequest, NavigationState,
    Notification, RequestToken, SortMode,
};
use app_fs::{IconRecord, Metadata};
use std::time::Instant;

/// Progress of one kind of load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// The icon opened in the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct IconDetail {
    pub icon: IconRecord,
    /// SVG source; `None` until loaded, empty if loading failed
    pub code: Option<String>,
}

impl IconDetail {
    pub fn is_loading(&self) -> bool {
        self.code.is_none()
    }

    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }
}

/// Main gallery state
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    /// Categories + metadata load
    catalog_phase: LoadPhase,

    /// Icon listing load for the current selection
    icons_phase: LoadPhase,

    categories: Vec<String>,
    metadata: Metadata,
    icons: Vec<IconRecord>,

    /// Selected category and its history
    navigation: NavigationState,

    query: String,
    sort: SortMode,
    detail: Option<IconDetail>,
    notification: Option<Notification>,

    /// Last issued icon request
    last_token: u64,

    /// Icon request whose response is still wanted
    pending: Option<RequestToken>,
}

impl GalleryState {
    /// Create a state starting at `location`
    pub fn new(location: GalleryLocation) -> Self {
        Self {
            navigation: NavigationState::new(location),
            ..Self::default()
        }
    }

    pub fn catalog_phase(&self) -> LoadPhase {
        self.catalog_phase
    }

    pub fn icons_phase(&self) -> LoadPhase {
        self.icons_phase
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn icons(&self) -> &[IconRecord] {
        &self.icons
    }

    pub fn location(&self) -> &GalleryLocation {
        self.navigation.current()
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.location().selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn detail(&self) -> Option<&IconDetail> {
        self.detail.as_ref()
    }

    /// Mark categories and metadata as loading
    pub fn begin_catalog_load(&mut self) {
        self.catalog_phase = LoadPhase::Loading;
    }

    /// Store loaded categories and metadata
    pub fn finish_catalog_load(&mut self, categories: Vec<String>, metadata: Metadata) {
        tracing::debug!(
            "Catalog loaded: {} categories, {} metadata entries",
            categories.len(),
            metadata.len()
        );
        self.categories = categories;
        self.metadata = metadata;
        self.catalog_phase = LoadPhase::Ready;
    }

    /// Issue a new icon request for the current selection. Any request
    /// issued earlier becomes stale.
    pub fn request_icons(&mut self) -> IconsRequest {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.pending = Some(token);
        self.icons_phase = LoadPhase::Loading;

        IconsRequest {
            token,
            selection: self.selection().clone(),
        }
    }

    /// Store an icon listing. Returns false (and drops `icons`) if `token`
    /// is not the latest request.
    pub fn finish_icons_load(&mut self, token: RequestToken, icons: Vec<IconRecord>) -> bool {
        if self.pending != Some(token) {
            tracing::debug!("Discarding stale icon response {:?}", token);
            return false;
        }

        tracing::debug!("Loaded {} icons for {}", icons.len(), self.selection().as_param());
        self.pending = None;
        self.icons = icons;
        self.icons_phase = LoadPhase::Ready;
        true
    }

    /// Apply a command and return the effects it requires
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        tracing::debug!("Command: {}", command.id().as_str());

        match command {
            Command::SelectCategory(selection) => {
                if self.navigation.navigate_to(GalleryLocation::new(selection)) {
                    self.location_changed()
                } else {
                    Vec::new()
                }
            }
            Command::NavigateBack => {
                if self.navigation.go_back() {
                    self.location_changed()
                } else {
                    Vec::new()
                }
            }
            Command::NavigateForward => {
                if self.navigation.go_forward() {
                    self.location_changed()
                } else {
                    Vec::new()
                }
            }
            Command::SetQuery(query) => {
                self.query = query;
                Vec::new()
            }
            Command::ToggleSort => {
                self.sort = self.sort.next();
                Vec::new()
            }
            Command::SetSort(sort) => {
                self.sort = sort;
                Vec::new()
            }
            Command::SelectIcon(icon) => {
                self.detail = Some(IconDetail {
                    icon: icon.clone(),
                    code: None,
                });
                vec![Effect::LoadDetail(icon)]
            }
            Command::CloseDetail => {
                self.detail = None;
                Vec::new()
            }
        }
    }

    fn location_changed(&mut self) -> Vec<Effect> {
        let location = self.location().clone();
        vec![Effect::Navigate(location), Effect::LoadIcons(self.request_icons())]
    }

    /// Store the SVG source for the detail view; `None` means loading
    /// failed and shows as empty code. Ignored if another icon is open.
    pub fn finish_detail_load(&mut self, icon: &IconRecord, code: Option<String>) -> bool {
        match self.detail.as_mut() {
            Some(detail) if &detail.icon == icon => {
                detail.code = Some(code.unwrap_or_default());
                true
            }
            _ => false,
        }
    }

    /// Show a notification, replacing the current one
    pub fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!("{}", notification.message);
        } else {
            tracing::info!("{}", notification.message);
        }
        self.notification = Some(notification);
    }

    /// The notification visible at `now`, if any
    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_visible(now))
    }

    /// Find a loaded icon
    pub fn find_icon(&self, category: &str, name: &str) -> Option<&IconRecord> {
        self.icons
            .iter()
            .find(|icon| icon.category == category && icon.name == name)
    }

    /// Derive what the gallery shows right now
    pub fn view(&self) -> GalleryView<'_> {
        derive_view(&self.categories, &self.metadata, &self.icons, &self.query, self.sort)
    }
}
