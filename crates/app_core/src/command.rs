//! Command system for user actions

use crate::{CategorySelection, GalleryLocation, SortMode};
use app_fs::IconRecord;

/// Command identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub &'static str);

impl CommandId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    // Navigation commands
    pub const NAV_SELECT_CATEGORY: &'static str = "nav.select_category";
    pub const NAV_BACK: &'static str = "nav.back";
    pub const NAV_FORWARD: &'static str = "nav.forward";

    // View commands
    pub const VIEW_SEARCH: &'static str = "view.search";
    pub const VIEW_TOGGLE_SORT: &'static str = "view.toggle_sort";
    pub const VIEW_SET_SORT: &'static str = "view.set_sort";
    pub const VIEW_OPEN_DETAIL: &'static str = "view.open_detail";
    pub const VIEW_CLOSE_DETAIL: &'static str = "view.close_detail";
}

/// A user action on the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectCategory(CategorySelection),
    NavigateBack,
    NavigateForward,
    SetQuery(String),
    ToggleSort,
    SetSort(SortMode),
    SelectIcon(IconRecord),
    CloseDetail,
}

impl Command {
    pub fn id(&self) -> CommandId {
        CommandId(match self {
            Command::SelectCategory(_) => CommandId::NAV_SELECT_CATEGORY,
            Command::NavigateBack => CommandId::NAV_BACK,
            Command::NavigateForward => CommandId::NAV_FORWARD,
            Command::SetQuery(_) => CommandId::VIEW_SEARCH,
            Command::ToggleSort => CommandId::VIEW_TOGGLE_SORT,
            Command::SetSort(_) => CommandId::VIEW_SET_SORT,
            Command::SelectIcon(_) => CommandId::VIEW_OPEN_DETAIL,
            Command::CloseDetail => CommandId::VIEW_CLOSE_DETAIL,
        })
    }
}

/// Token identifying one icon listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// An icon listing the state is waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconsRequest {
    pub token: RequestToken,
    pub selection: CategorySelection,
}

/// Side effect requested by a state change, carried out by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the icon listing for a selection
    LoadIcons(IconsRequest),
    /// Fetch the SVG source for the detail view
    LoadDetail(IconRecord),
    /// The URL should now reflect this location
    Navigate(GalleryLocation),
}
