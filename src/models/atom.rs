//! Item and container descriptions handed to the field extractor.
//!
//! These mirror the launcher atom schema: one sum type for "what was
//! touched" and one for "where it lives", each variant carrying its own
//! record. Variant tags are the schema's field numbers and are written to
//! the sink verbatim.

use serde::{Deserialize, Serialize};

/// Page index reported when a container carries no grid position.
pub const DEFAULT_PAGE_INDEX: i32 = -2;

/// Container variant codes as reported in the `hierarchy` field.
pub mod container_code {
    pub const NOT_SET: i32 = 0;
    pub const WORKSPACE: i32 = 1;
    pub const HOTSEAT: i32 = 2;
    pub const FOLDER: i32 = 3;
    pub const ALL_APPS: i32 = 4;
    pub const WIDGETS: i32 = 5;
    pub const PREDICTION: i32 = 6;
    pub const SEARCH_RESULT: i32 = 7;
    pub const SHORTCUTS: i32 = 8;
    pub const SETTINGS: i32 = 9;
    pub const PREDICTED_HOTSEAT: i32 = 10;
    pub const TASK_SWITCHER: i32 = 11;
}

/// Codes for the container a folder sits in.
pub mod parent_code {
    pub const NOT_SET: i32 = 0;
    pub const WORKSPACE: i32 = 4;
    pub const HOTSEAT: i32 = 5;
}

/// Item variant tags as reported in the `target_id` field.
pub mod target_code {
    pub const NOT_SET: i32 = 0;
    pub const APPLICATION: i32 = 1;
    pub const TASK: i32 = 2;
    pub const SHORTCUT: i32 = 3;
    pub const WIDGET: i32 = 4;
    pub const FOLDER_ICON: i32 = 9;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTarget {
    pub package_name: String,
    pub component_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutTarget {
    pub shortcut_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTarget {
    pub package_name: String,
    pub component_name: String,
    pub span_x: i32,
    pub span_y: i32,
}

/// Folder label transition attached to a folder icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderIcon {
    pub from_label_state: i32,
    pub to_label_state: i32,
    pub label_text: String,
    pub cardinality: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Application(AppTarget),
    Task(AppTarget),
    Shortcut(ShortcutTarget),
    Widget(WidgetTarget),
    FolderIcon(FolderIcon),
    /// Any item case this crate has no record type for; `code` 0 means unset.
    Other { code: i32 },
}

impl Default for ItemKind {
    fn default() -> Self {
        ItemKind::Other {
            code: target_code::NOT_SET,
        }
    }
}

impl ItemKind {
    pub fn code(&self) -> i32 {
        match self {
            ItemKind::Application(_) => target_code::APPLICATION,
            ItemKind::Task(_) => target_code::TASK,
            ItemKind::Shortcut(_) => target_code::SHORTCUT,
            ItemKind::Widget(_) => target_code::WIDGET,
            ItemKind::FolderIcon(_) => target_code::FOLDER_ICON,
            ItemKind::Other { code } => *code,
        }
    }
}

/// What an event was about, detached from the live model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescription {
    pub kind: ItemKind,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub is_work: bool,
    /// Origin attribute, reported by snapshots.
    #[serde(default)]
    pub attribute: i32,
}

impl ItemDescription {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn folder_icon(&self) -> Option<&FolderIcon> {
        match &self.kind {
            ItemKind::FolderIcon(icon) => Some(icon),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    pub grid_x: i32,
    pub grid_y: i32,
    pub page_index: i32,
}

impl Default for GridPosition {
    fn default() -> Self {
        Self {
            grid_x: 0,
            grid_y: 0,
            page_index: DEFAULT_PAGE_INDEX,
        }
    }
}

impl GridPosition {
    pub fn new(grid_x: i32, grid_y: i32, page_index: i32) -> Self {
        Self {
            grid_x,
            grid_y,
            page_index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParentContainer {
    Workspace(GridPosition),
    Hotseat(GridPosition),
}

impl ParentContainer {
    pub fn code(&self) -> i32 {
        match self {
            ParentContainer::Workspace(_) => parent_code::WORKSPACE,
            ParentContainer::Hotseat(_) => parent_code::HOTSEAT,
        }
    }

    pub fn position(&self) -> GridPosition {
        match self {
            ParentContainer::Workspace(position) | ParentContainer::Hotseat(position) => *position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderContainer {
    /// Position of the item inside the folder.
    pub position: GridPosition,
    /// Where the folder itself lives.
    pub parent: Option<ParentContainer>,
}

impl FolderContainer {
    pub fn parent_code(&self) -> i32 {
        self.parent
            .as_ref()
            .map_or(parent_code::NOT_SET, ParentContainer::code)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedHotseatContainer {
    pub index: i32,
    pub cardinality: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerInfo {
    Workspace(GridPosition),
    Hotseat(GridPosition),
    PredictedHotseat(PredictedHotseatContainer),
    Folder(FolderContainer),
    /// Containers without a record type (all apps, widgets tray, ...); `code` 0 means unset.
    Other { code: i32 },
}

impl Default for ContainerInfo {
    fn default() -> Self {
        ContainerInfo::Other {
            code: container_code::NOT_SET,
        }
    }
}

impl ContainerInfo {
    pub fn code(&self) -> i32 {
        match self {
            ContainerInfo::Workspace(_) => container_code::WORKSPACE,
            ContainerInfo::Hotseat(_) => container_code::HOTSEAT,
            ContainerInfo::PredictedHotseat(_) => container_code::PREDICTED_HOTSEAT,
            ContainerInfo::Folder(_) => container_code::FOLDER,
            ContainerInfo::Other { code } => *code,
        }
    }
}
