use serde::{Deserialize, Serialize};

/// Item-derived columns shared by event and snapshot records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    pub target_id: i32,
    pub package_name: Option<String>,
    pub component_name: Option<String>,
    pub grid_x: i32,
    pub grid_y: i32,
    pub page_id: i32,
    pub grid_x_parent: i32,
    pub grid_y_parent: i32,
    pub page_id_parent: i32,
    pub hierarchy: i32,
    pub is_work_profile: bool,
    /// The item's own rank, before any caller override.
    pub rank: i32,
    pub from_label_state: Option<i32>,
    pub to_label_state: Option<i32>,
    pub label_text: Option<String>,
    pub cardinality: i32,
    pub origin: i32,
    pub span_x: i32,
    pub span_y: i32,
}

/// One launcher UI event, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_id: i32,
    pub target_id: i32,
    pub instance_id: i32,
    pub uid: i32,
    pub package_name: Option<String>,
    pub component_name: Option<String>,
    pub grid_x: i32,
    pub grid_y: i32,
    pub page_id: i32,
    pub grid_x_parent: i32,
    pub grid_y_parent: i32,
    pub page_id_parent: i32,
    pub hierarchy: i32,
    pub is_work_profile: bool,
    pub rank: i32,
    pub from_label_state: Option<i32>,
    pub to_label_state: Option<i32>,
    pub label_text: Option<String>,
    pub cardinality: i32,
    pub src_state: i32,
    pub dst_state: i32,
}

/// Per-event values that do not come from the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    pub event_id: i32,
    pub instance_id: i32,
    pub src_state: i32,
    pub dst_state: i32,
    /// Overrides the item's rank when set.
    pub rank: Option<i32>,
}

impl EventRecord {
    pub fn new(header: EventHeader, fields: ItemFields) -> Self {
        Self {
            event_id: header.event_id,
            target_id: fields.target_id,
            instance_id: header.instance_id,
            uid: 0,
            package_name: fields.package_name,
            component_name: fields.component_name,
            grid_x: fields.grid_x,
            grid_y: fields.grid_y,
            page_id: fields.page_id,
            grid_x_parent: fields.grid_x_parent,
            grid_y_parent: fields.grid_y_parent,
            page_id_parent: fields.page_id_parent,
            hierarchy: fields.hierarchy,
            is_work_profile: fields.is_work_profile,
            rank: header.rank.unwrap_or(fields.rank),
            from_label_state: fields.from_label_state,
            to_label_state: fields.to_label_state,
            label_text: fields.label_text,
            cardinality: fields.cardinality,
            src_state: header.src_state,
            dst_state: header.dst_state,
        }
    }
}

/// One item of a full model dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    pub event_id: i32,
    pub target_id: i32,
    pub instance_id: i32,
    pub uid: i32,
    pub package_name: Option<String>,
    pub component_name: Option<String>,
    pub grid_x: i32,
    pub grid_y: i32,
    pub page_id: i32,
    pub grid_x_parent: i32,
    pub grid_y_parent: i32,
    pub page_id_parent: i32,
    pub hierarchy: i32,
    pub is_work_profile: bool,
    pub origin: i32,
    pub cardinality: i32,
    pub span_x: i32,
    pub span_y: i32,
}

impl SnapshotRecord {
    pub fn new(instance_id: i32, fields: ItemFields) -> Self {
        Self {
            event_id: 0,
            target_id: fields.target_id,
            instance_id,
            uid: 0,
            package_name: fields.package_name,
            component_name: fields.component_name,
            grid_x: fields.grid_x,
            grid_y: fields.grid_y,
            page_id: fields.page_id,
            grid_x_parent: fields.grid_x_parent,
            grid_y_parent: fields.grid_y_parent,
            page_id_parent: fields.page_id_parent,
            hierarchy: fields.hierarchy,
            is_work_profile: fields.is_work_profile,
            origin: fields.origin,
            cardinality: fields.cardinality,
            span_x: fields.span_x,
            span_y: fields.span_y,
        }
    }
}

/// A ranked result was picked; carries no item hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRecord {
    pub event_id: i32,
    pub package_name: Option<String>,
    pub instance_id: i32,
    pub position: i32,
}

/// Everything a sink can be asked to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "atom", rename_all = "snake_case")]
pub enum StatsAtom {
    Event(EventRecord),
    Snapshot(SnapshotRecord),
    Ranking(RankingRecord),
}

impl StatsAtom {
    pub fn instance_id(&self) -> i32 {
        match self {
            StatsAtom::Event(record) => record.instance_id,
            StatsAtom::Snapshot(record) => record.instance_id,
            StatsAtom::Ranking(record) => record.instance_id,
        }
    }
}
