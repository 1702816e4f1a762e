use serde::{Deserialize, Serialize};

use super::atom::{
    container_code, ContainerInfo, FolderContainer, FolderIcon, GridPosition, ItemDescription,
    ItemKind, ParentContainer, PredictedHotseatContainer,
};

/// Well-known container ids. Any non-negative container id is a folder id.
pub mod container_id {
    pub const DESKTOP: i32 = -100;
    pub const HOTSEAT: i32 = -101;
    pub const PREDICTION: i32 = -102;
    pub const HOTSEAT_PREDICTION: i32 = -103;
    pub const ALL_APPS: i32 = -104;
    pub const WIDGETS_TRAY: i32 = -105;
    pub const SEARCH_RESULTS: i32 = -106;
    pub const SHORTCUTS: i32 = -107;
    pub const SETTINGS: i32 = -108;
    pub const TASK_SWITCHER: i32 = -109;
    pub const NO_ID: i32 = -1;
}

/// An item as held by the launcher model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInfo {
    pub id: i32,
    /// Negative: a well-known container. Non-negative: id of the enclosing folder.
    pub container: i32,
    #[serde(default)]
    pub screen_id: i32,
    #[serde(default)]
    pub cell_x: i32,
    #[serde(default)]
    pub cell_y: i32,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub is_work: bool,
    #[serde(default)]
    pub attribute: i32,
    pub kind: ItemKind,
    /// Set by producers that know more about a non-folder container than its
    /// id, e.g. the cardinality of a predicted hotseat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_container: Option<ContainerInfo>,
}

impl Default for ItemInfo {
    fn default() -> Self {
        Self {
            id: container_id::NO_ID,
            container: container_id::NO_ID,
            screen_id: -1,
            cell_x: -1,
            cell_y: -1,
            rank: 0,
            is_work: false,
            attribute: 0,
            kind: ItemKind::default(),
            extended_container: None,
        }
    }
}

impl ItemInfo {
    pub fn new(id: i32, container: i32, kind: ItemKind) -> Self {
        Self {
            id,
            container,
            kind,
            ..Self::default()
        }
    }

    pub fn at(mut self, screen_id: i32, cell_x: i32, cell_y: i32) -> Self {
        self.screen_id = screen_id;
        self.cell_x = cell_x;
        self.cell_y = cell_y;
        self
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    /// True when the container must be looked up in the model before logging.
    pub fn needs_container_lookup(&self) -> bool {
        self.container >= 0
    }

    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.cell_x, self.cell_y, self.screen_id)
    }

    pub fn describe(&self) -> ItemDescription {
        ItemDescription {
            kind: self.kind.clone(),
            rank: self.rank,
            is_work: self.is_work,
            attribute: self.attribute,
        }
    }

    /// Container description for this item. `folder` is the resolved parent
    /// folder when the item lives in one.
    pub fn container_info(&self, folder: Option<&FolderInfo>) -> ContainerInfo {
        if let Some(folder) = folder {
            return self.container_in(folder.parent_container());
        }
        if let Some(extended) = self.extended_container {
            return extended;
        }

        match self.container {
            container_id::DESKTOP => ContainerInfo::Workspace(self.position()),
            container_id::HOTSEAT => ContainerInfo::Hotseat(self.position()),
            container_id::HOTSEAT_PREDICTION => {
                ContainerInfo::PredictedHotseat(PredictedHotseatContainer {
                    index: self.screen_id,
                    cardinality: 0,
                })
            }
            container_id::PREDICTION => other(container_code::PREDICTION),
            container_id::ALL_APPS => other(container_code::ALL_APPS),
            container_id::WIDGETS_TRAY => other(container_code::WIDGETS),
            container_id::SEARCH_RESULTS => other(container_code::SEARCH_RESULT),
            container_id::SHORTCUTS => other(container_code::SHORTCUTS),
            container_id::SETTINGS => other(container_code::SETTINGS),
            container_id::TASK_SWITCHER => other(container_code::TASK_SWITCHER),
            _ => ContainerInfo::default(),
        }
    }

    /// Folder container for this item given its folder's already resolved parent.
    pub fn container_in(&self, parent: Option<ParentContainer>) -> ContainerInfo {
        ContainerInfo::Folder(FolderContainer {
            position: self.position(),
            parent,
        })
    }
}

fn other(code: i32) -> ContainerInfo {
    ContainerInfo::Other { code }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub id: i32,
    pub container: i32,
    #[serde(default)]
    pub screen_id: i32,
    #[serde(default)]
    pub cell_x: i32,
    #[serde(default)]
    pub cell_y: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contents: Vec<ItemInfo>,
}

impl FolderInfo {
    pub fn new(id: i32, container: i32) -> Self {
        Self {
            id,
            container,
            screen_id: 0,
            cell_x: 0,
            cell_y: 0,
            title: String::new(),
            contents: Vec::new(),
        }
    }

    pub fn at(mut self, screen_id: i32, cell_x: i32, cell_y: i32) -> Self {
        self.screen_id = screen_id;
        self.cell_x = cell_x;
        self.cell_y = cell_y;
        self
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Where this folder sits; `None` when it is neither on the workspace nor the hotseat.
    pub fn parent_container(&self) -> Option<ParentContainer> {
        let position = GridPosition::new(self.cell_x, self.cell_y, self.screen_id);
        match self.container {
            container_id::DESKTOP => Some(ParentContainer::Workspace(position)),
            container_id::HOTSEAT => Some(ParentContainer::Hotseat(position)),
            _ => None,
        }
    }

    /// The folder's own icon as an item, labelled with its title.
    pub fn icon_item(&self) -> ItemInfo {
        let cardinality = i32::try_from(self.contents.len()).unwrap_or(i32::MAX);
        ItemInfo {
            id: self.id,
            container: self.container,
            screen_id: self.screen_id,
            cell_x: self.cell_x,
            cell_y: self.cell_y,
            kind: ItemKind::FolderIcon(FolderIcon {
                label_text: self.title.clone(),
                cardinality,
                ..FolderIcon::default()
            }),
            ..ItemInfo::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::atom::{parent_code, AppTarget};

    fn app() -> ItemKind {
        ItemKind::Application(AppTarget {
            package_name: "com.example.mail".into(),
            component_name: "com.example.mail/.Inbox".into(),
        })
    }

    #[test]
    fn desktop_item_maps_to_workspace() {
        let item = ItemInfo::new(1, container_id::DESKTOP, app()).at(2, 3, 4);
        assert_eq!(
            item.container_info(None),
            ContainerInfo::Workspace(GridPosition::new(3, 4, 2))
        );
        assert!(!item.needs_container_lookup());
    }

    #[test]
    fn folder_item_takes_parent_from_folder() {
        let folder = FolderInfo::new(7, container_id::HOTSEAT).at(0, 2, 0);
        let item = ItemInfo::new(8, 7, app()).at(0, 1, 1);
        assert!(item.needs_container_lookup());

        match item.container_info(Some(&folder)) {
            ContainerInfo::Folder(container) => {
                assert_eq!(container.position, GridPosition::new(1, 1, 0));
                assert_eq!(container.parent_code(), parent_code::HOTSEAT);
                assert_eq!(
                    container.parent.map(|p| p.position()),
                    Some(GridPosition::new(2, 0, 0))
                );
            }
            other => panic!("expected folder container, got {other:?}"),
        }
    }

    #[test]
    fn extended_container_overrides_id_mapping() {
        let mut item = ItemInfo::new(3, container_id::HOTSEAT_PREDICTION, app());
        item.extended_container = Some(ContainerInfo::PredictedHotseat(
            PredictedHotseatContainer {
                index: 1,
                cardinality: 5,
            },
        ));
        assert_eq!(
            item.container_info(None),
            ContainerInfo::PredictedHotseat(PredictedHotseatContainer {
                index: 1,
                cardinality: 5
            })
        );
    }

    #[test]
    fn unknown_container_is_unset() {
        let item = ItemInfo::new(3, -42, app());
        assert_eq!(item.container_info(None), ContainerInfo::default());
    }

    #[test]
    fn folder_icon_counts_contents() {
        let mut folder = FolderInfo::new(4, container_id::DESKTOP).titled("Games");
        folder.contents.push(ItemInfo::new(5, 4, app()));
        folder.contents.push(ItemInfo::new(6, 4, app()));

        let icon = folder.icon_item().describe();
        let folder_icon = icon.folder_icon().unwrap();
        assert_eq!(folder_icon.cardinality, 2);
        assert_eq!(folder_icon.label_text, "Games");
    }
}
