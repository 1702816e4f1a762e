//! Maps an item and its container onto the flat record columns.
//!
//! Everything here is pure. Variants without a matching source leave the
//! dependent columns at `None` / zero instead of failing.

use crate::models::{ContainerInfo, GridPosition, ItemDescription, ItemKind};

use super::record::ItemFields;

/// Added to a folder's parent-container code so "inside a folder on X" never
/// collides with a plain container code.
pub const FOLDER_HIERARCHY_OFFSET: i32 = 100;

pub fn extract(item: &ItemDescription, container: &ContainerInfo) -> ItemFields {
    let own = grid_position(container, false);
    let parent = grid_position(container, true);
    let folder_icon = item.folder_icon();
    let (span_x, span_y) = match &item.kind {
        ItemKind::Widget(widget) => (widget.span_x, widget.span_y),
        _ => (0, 0),
    };

    ItemFields {
        target_id: item.kind.code(),
        package_name: package_name(item),
        component_name: component_name(item),
        grid_x: own.grid_x,
        grid_y: own.grid_y,
        page_id: own.page_index,
        grid_x_parent: parent.grid_x,
        grid_y_parent: parent.grid_y,
        page_id_parent: parent.page_index,
        hierarchy: hierarchy(container),
        is_work_profile: item.is_work,
        rank: item.rank,
        from_label_state: folder_icon.map(|icon| icon.from_label_state),
        to_label_state: folder_icon.map(|icon| icon.to_label_state),
        label_text: folder_icon.map(|icon| icon.label_text.clone()),
        cardinality: cardinality(item, container),
        origin: item.attribute,
        span_x,
        span_y,
    }
}

pub fn package_name(item: &ItemDescription) -> Option<String> {
    match &item.kind {
        ItemKind::Application(app) | ItemKind::Task(app) => Some(app.package_name.clone()),
        ItemKind::Shortcut(shortcut) => Some(shortcut.shortcut_name.clone()),
        ItemKind::Widget(widget) => Some(widget.package_name.clone()),
        ItemKind::FolderIcon(_) | ItemKind::Other { .. } => None,
    }
}

pub fn component_name(item: &ItemDescription) -> Option<String> {
    match &item.kind {
        ItemKind::Application(app) | ItemKind::Task(app) => Some(app.component_name.clone()),
        // Shortcuts have no component of their own.
        ItemKind::Shortcut(shortcut) => Some(shortcut.shortcut_name.clone()),
        ItemKind::Widget(widget) => Some(widget.component_name.clone()),
        ItemKind::FolderIcon(_) | ItemKind::Other { .. } => None,
    }
}

/// Grid position of the item (`parent == false`) or of its enclosing
/// container (`parent == true`). Outside folders both are the same.
pub fn grid_position(container: &ContainerInfo, parent: bool) -> GridPosition {
    match container {
        ContainerInfo::Folder(folder) if parent => folder
            .parent
            .map(|p| p.position())
            .unwrap_or_default(),
        ContainerInfo::Folder(folder) => folder.position,
        ContainerInfo::Workspace(position) | ContainerInfo::Hotseat(position) => *position,
        ContainerInfo::PredictedHotseat(_) | ContainerInfo::Other { .. } => {
            GridPosition::default()
        }
    }
}

pub fn hierarchy(container: &ContainerInfo) -> i32 {
    match container {
        ContainerInfo::Folder(folder) => folder.parent_code() + FOLDER_HIERARCHY_OFFSET,
        other => other.code(),
    }
}

pub fn cardinality(item: &ItemDescription, container: &ContainerInfo) -> i32 {
    match container {
        ContainerInfo::PredictedHotseat(hotseat) => hotseat.cardinality,
        _ => item.folder_icon().map_or(0, |icon| icon.cardinality),
    }
}
