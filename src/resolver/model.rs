use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::models::{FolderInfo, ItemInfo};

/// The launcher's item model. Owned by the model worker; every read and write
/// goes through its queue.
#[derive(Debug, Clone, Default)]
pub struct BgDataModel {
    pub folders: BTreeMap<i32, Arc<FolderInfo>>,
    pub workspace_items: Vec<Arc<ItemInfo>>,
    pub app_widgets: Vec<Arc<ItemInfo>>,
}

impl BgDataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_workspace_item(&mut self, item: ItemInfo) {
        self.workspace_items.push(Arc::new(item));
    }

    pub fn add_app_widget(&mut self, widget: ItemInfo) {
        self.app_widgets.push(Arc::new(widget));
    }

    /// Inserts or replaces the folder with the same id.
    pub fn put_folder(&mut self, folder: FolderInfo) {
        self.folders.insert(folder.id, Arc::new(folder));
    }

    pub fn remove_folder(&mut self, folder_id: i32) -> Option<Arc<FolderInfo>> {
        self.folders.remove(&folder_id)
    }

    /// Appends `item` to its folder. Copy-on-write: snapshots already handed
    /// out keep the old contents. Returns `false` if the folder is unknown.
    pub fn add_to_folder(&mut self, item: ItemInfo) -> bool {
        match self.folders.get_mut(&item.container) {
            Some(folder) => {
                Arc::make_mut(folder).contents.push(item);
                true
            }
            None => false,
        }
    }

    /// Removes an item by id from every collection.
    pub fn remove_item(&mut self, item_id: i32) {
        self.workspace_items.retain(|item| item.id != item_id);
        self.app_widgets.retain(|item| item.id != item_id);
        for folder in self.folders.values_mut() {
            if folder.contents.iter().any(|item| item.id == item_id) {
                Arc::make_mut(folder).contents.retain(|item| item.id != item_id);
            }
        }
    }

    pub fn item_count(&self) -> usize {
        self.workspace_items.len()
            + self.app_widgets.len()
            + self
                .folders
                .values()
                .map(|folder| folder.contents.len())
                .sum::<usize>()
    }
}

/// Point-in-time view of the model handed to resolver tasks. Cloning the
/// collections only bumps reference counts.
#[derive(Debug, Clone, Default)]
pub struct ModelSnapshot {
    pub folders: BTreeMap<i32, Arc<FolderInfo>>,
    pub workspace_items: Vec<Arc<ItemInfo>>,
    pub app_widgets: Vec<Arc<ItemInfo>>,
}

impl ModelSnapshot {
    pub fn capture(model: &BgDataModel) -> Self {
        Self {
            folders: model.folders.clone(),
            workspace_items: model.workspace_items.clone(),
            app_widgets: model.app_widgets.clone(),
        }
    }

    pub fn folder(&self, folder_id: i32) -> Option<&FolderInfo> {
        self.folders.get(&folder_id).map(Arc::as_ref)
    }
}

/// Serialized form of a launcher layout, as loaded by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    #[serde(default)]
    pub workspace_items: Vec<ItemInfo>,
    #[serde(default)]
    pub folders: Vec<FolderInfo>,
    #[serde(default)]
    pub app_widgets: Vec<ItemInfo>,
}

impl From<LayoutDump> for BgDataModel {
    fn from(dump: LayoutDump) -> Self {
        let mut model = BgDataModel::new();
        for item in dump.workspace_items {
            model.add_workspace_item(item);
        }
        for folder in dump.folders {
            model.put_folder(folder);
        }
        for widget in dump.app_widgets {
            model.add_app_widget(widget);
        }
        model
    }
}
