//! Icon Gallery Core Domain Logic
//!
//! This crate contains:
//! - Gallery state management
//! - Command system
//! - Configuration
//! - Error types
//! - Navigation (category selection mirrored in the URL query)
//! - Gallery view-model: ordering, search, sort and grouping
//! - Data sources and the async controller

pub mod state;
pub mod config;
pub mod command;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod gallery;
pub mod source;
pub mod controller;
mod collate;

pub use state::{GalleryState, IconDetail, LoadPhase};
pub use config::{AppConfig, ClientConfig, LogConfig, ServerConfig, StoreConfig};
pub use command::{Command, CommandId, Effect, IconsRequest, RequestToken};
pub use error::AppError;
pub use navigation::{GalleryLocation, NavigationState, CATEGORY_PARAM};
pub use notification::{Notification, NotificationKind, NOTIFICATION_DURATION};
pub use gallery::{
    category_display_name, derive_view, icon_display_name, CategorySelection, GalleryView,
    IconGroup, SortMode,
};
pub use source::{GallerySource, LocalSource};
pub use controller::GalleryController;
pub use collate::locale_cmp;
