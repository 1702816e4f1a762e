use crate::models::{EventEnum, InstanceId, ItemInfo, LauncherState};

use super::{
    manager::{Dispatch, StatsLogManager},
    record::EventHeader,
};

/// Immutable builder for one launcher event.
///
/// Every `with_*` call returns a new builder and replaces the previous value
/// of that field. Clone a partially configured builder to log several events
/// from the same base.
#[derive(Clone)]
pub struct StatsLogger {
    manager: StatsLogManager,
    item: ItemInfo,
    instance_id: InstanceId,
    rank: Option<i32>,
    src_state: LauncherState,
    dst_state: LauncherState,
}

impl StatsLogger {
    pub(crate) fn new(manager: StatsLogManager) -> Self {
        Self {
            manager,
            item: ItemInfo::default(),
            instance_id: InstanceId::DEFAULT,
            rank: None,
            src_state: LauncherState::Home,
            dst_state: LauncherState::Background,
        }
    }

    pub fn with_item(self, item: ItemInfo) -> Self {
        Self { item, ..self }
    }

    pub fn with_instance_id(self, instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            ..self
        }
    }

    /// Overrides the item's own rank.
    pub fn with_rank(self, rank: i32) -> Self {
        Self {
            rank: Some(rank),
            ..self
        }
    }

    pub fn with_src_state(self, src_state: LauncherState) -> Self {
        Self { src_state, ..self }
    }

    pub fn with_dst_state(self, dst_state: LauncherState) -> Self {
        Self { dst_state, ..self }
    }

    pub fn item(&self) -> &ItemInfo {
        &self.item
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn rank(&self) -> Option<i32> {
        self.rank
    }

    /// Writes the event. The item's rank is read here, not when the builder
    /// was created.
    pub fn log(&self, event: &dyn EventEnum) -> Dispatch {
        let header = EventHeader {
            event_id: event.id(),
            instance_id: self.instance_id.id(),
            src_state: self.src_state.code(),
            dst_state: self.dst_state.code(),
            rank: self.rank,
        };
        self.manager.dispatch(event, self.item.clone(), header)
    }
}
