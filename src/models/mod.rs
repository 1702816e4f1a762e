pub mod atom;
pub mod event;
pub mod instance_id;
pub mod item;

pub use atom::{
    AppTarget, ContainerInfo, FolderContainer, FolderIcon, GridPosition, ItemDescription,
    ItemKind, ParentContainer, PredictedHotseatContainer, ShortcutTarget, WidgetTarget,
    DEFAULT_PAGE_INDEX,
};
pub use event::{EventEnum, LauncherEvent, LauncherState};
pub use instance_id::{InstanceId, InstanceIdSequence, InstanceIdSource, INSTANCE_ID_MAX};
pub use item::{container_id, FolderInfo, ItemInfo};
