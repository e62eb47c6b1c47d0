//! Plain-text rendering of the gallery for the terminal

use app_core::{category_display_name, icon_display_name, GalleryState, IconDetail, Notification};
use app_fs::Metadata;
use std::fmt::Write;

/// Render the category list, then every non-empty group with its icons
pub fn render_gallery(state: &GalleryState) -> String {
    let metadata = state.metadata();
    let view = state.view();
    let mut out = String::new();

    let selected = state.selection().as_param();
    let _ = writeln!(out, "Category: {}", selected);
    if !state.query().is_empty() {
        let _ = writeln!(out, "Search: {:?}", state.query());
    }
    let _ = writeln!(out, "Sort: {}", state.sort());

    let names: Vec<_> = view
        .categories
        .iter()
        .map(|c| category_display_name(c, metadata))
        .collect();
    let _ = writeln!(out, "Categories: all, {}", names.join(", "));
    out.push('\n');

    if view.is_empty() {
        out.push_str("No icons found\n");
        return out;
    }

    for group in &view.groups {
        let _ = writeln!(out, "## {} ({})", group.display_name, group.icons.len());
        if let Some(description) = &group.description {
            let _ = writeln!(out, "   {}", description);
        }
        for icon in &group.icons {
            let _ = writeln!(
                out,
                "   {:<24} {}",
                icon_display_name(icon, metadata),
                icon.path
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{} of {} icons", view.matched(), view.total);
    out
}

/// Render the detail view of one icon
pub fn render_detail(detail: &IconDetail, metadata: &Metadata) -> String {
    let icon = &detail.icon;
    let mut out = String::new();

    let _ = writeln!(out, "{}", icon_display_name(icon, metadata));
    let _ = writeln!(out, "Category: {}", category_display_name(&icon.category, metadata));
    if let Some(description) = app_core::gallery::icon_meta(icon, metadata).and_then(|m| m.description.as_deref()) {
        let _ = writeln!(out, "Description: {}", description);
    }
    let _ = writeln!(out, "Path: {}", icon.path);
    out.push('\n');
    out.push_str(detail.code());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// One-line notification text
pub fn render_notification(notification: &Notification) -> String {
    let marker = if notification.is_error() { "✗" } else { "✓" };
    format!("{} {}", marker, notification.message)
}
