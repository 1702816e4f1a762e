use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::{
    db::{
        helpers::{parse_datetime, to_i64},
        Database,
    },
    stats::{EventRecord, RankingRecord, SnapshotRecord, StatsAtom},
};

/// A persisted record with its row id and write time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: i64,
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: T,
}

pub fn insert_atom(conn: &Connection, atom: &StatsAtom, logged_at: DateTime<Utc>) -> Result<()> {
    let logged_at = logged_at.to_rfc3339();
    match atom {
        StatsAtom::Event(record) => {
            conn.execute(
                "INSERT INTO launcher_events (
                    logged_at, event_id, target_id, instance_id, uid,
                    package_name, component_name,
                    grid_x, grid_y, page_id, grid_x_parent, grid_y_parent, page_id_parent,
                    hierarchy, is_work_profile, rank,
                    from_label_state, to_label_state, label_text,
                    cardinality, src_state, dst_state
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
                params![
                    logged_at,
                    record.event_id,
                    record.target_id,
                    record.instance_id,
                    record.uid,
                    record.package_name,
                    record.component_name,
                    record.grid_x,
                    record.grid_y,
                    record.page_id,
                    record.grid_x_parent,
                    record.grid_y_parent,
                    record.page_id_parent,
                    record.hierarchy,
                    record.is_work_profile,
                    record.rank,
                    record.from_label_state,
                    record.to_label_state,
                    record.label_text,
                    record.cardinality,
                    record.src_state,
                    record.dst_state,
                ],
            )
            .context("failed to insert launcher event")?;
        }
        StatsAtom::Snapshot(record) => {
            conn.execute(
                "INSERT INTO launcher_snapshots (
                    logged_at, event_id, target_id, instance_id, uid,
                    package_name, component_name,
                    grid_x, grid_y, page_id, grid_x_parent, grid_y_parent, page_id_parent,
                    hierarchy, is_work_profile, origin, cardinality, span_x, span_y
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                params![
                    logged_at,
                    record.event_id,
                    record.target_id,
                    record.instance_id,
                    record.uid,
                    record.package_name,
                    record.component_name,
                    record.grid_x,
                    record.grid_y,
                    record.page_id,
                    record.grid_x_parent,
                    record.grid_y_parent,
                    record.page_id_parent,
                    record.hierarchy,
                    record.is_work_profile,
                    record.origin,
                    record.cardinality,
                    record.span_x,
                    record.span_y,
                ],
            )
            .context("failed to insert launcher snapshot")?;
        }
        StatsAtom::Ranking(record) => {
            conn.execute(
                "INSERT INTO ranking_selected (
                    logged_at, event_id, package_name, instance_id, position_picked
                ) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    logged_at,
                    record.event_id,
                    record.package_name,
                    record.instance_id,
                    record.position,
                ],
            )
            .context("failed to insert ranking selection")?;
        }
    }
    Ok(())
}

fn row_to_event(row: &Row) -> Result<Stored<EventRecord>> {
    let logged_at: String = row.get("logged_at")?;
    Ok(Stored {
        id: row.get("id")?,
        logged_at: parse_datetime(&logged_at, "logged_at")?,
        record: EventRecord {
            event_id: row.get("event_id")?,
            target_id: row.get("target_id")?,
            instance_id: row.get("instance_id")?,
            uid: row.get("uid")?,
            package_name: row.get("package_name")?,
            component_name: row.get("component_name")?,
            grid_x: row.get("grid_x")?,
            grid_y: row.get("grid_y")?,
            page_id: row.get("page_id")?,
            grid_x_parent: row.get("grid_x_parent")?,
            grid_y_parent: row.get("grid_y_parent")?,
            page_id_parent: row.get("page_id_parent")?,
            hierarchy: row.get("hierarchy")?,
            is_work_profile: row.get("is_work_profile")?,
            rank: row.get("rank")?,
            from_label_state: row.get("from_label_state")?,
            to_label_state: row.get("to_label_state")?,
            label_text: row.get("label_text")?,
            cardinality: row.get("cardinality")?,
            src_state: row.get("src_state")?,
            dst_state: row.get("dst_state")?,
        },
    })
}

fn row_to_snapshot(row: &Row) -> Result<Stored<SnapshotRecord>> {
    let logged_at: String = row.get("logged_at")?;
    Ok(Stored {
        id: row.get("id")?,
        logged_at: parse_datetime(&logged_at, "logged_at")?,
        record: SnapshotRecord {
            event_id: row.get("event_id")?,
            target_id: row.get("target_id")?,
            instance_id: row.get("instance_id")?,
            uid: row.get("uid")?,
            package_name: row.get("package_name")?,
            component_name: row.get("component_name")?,
            grid_x: row.get("grid_x")?,
            grid_y: row.get("grid_y")?,
            page_id: row.get("page_id")?,
            grid_x_parent: row.get("grid_x_parent")?,
            grid_y_parent: row.get("grid_y_parent")?,
            page_id_parent: row.get("page_id_parent")?,
            hierarchy: row.get("hierarchy")?,
            is_work_profile: row.get("is_work_profile")?,
            origin: row.get("origin")?,
            cardinality: row.get("cardinality")?,
            span_x: row.get("span_x")?,
            span_y: row.get("span_y")?,
        },
    })
}

fn row_to_ranking(row: &Row) -> Result<Stored<RankingRecord>> {
    let logged_at: String = row.get("logged_at")?;
    Ok(Stored {
        id: row.get("id")?,
        logged_at: parse_datetime(&logged_at, "logged_at")?,
        record: RankingRecord {
            event_id: row.get("event_id")?,
            package_name: row.get("package_name")?,
            instance_id: row.get("instance_id")?,
            position: row.get("position_picked")?,
        },
    })
}

impl Database {
    /// Most recent launcher events, newest first.
    pub async fn recent_events(&self, limit: usize) -> Result<Vec<Stored<EventRecord>>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM launcher_events
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;

            let mut rows = stmt.query(params![limit])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(row_to_event(row)?);
            }

            Ok(events)
        })
        .await
    }

    /// Every record of one snapshot, in write order.
    pub async fn snapshot_records(&self, instance_id: i32) -> Result<Vec<Stored<SnapshotRecord>>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM launcher_snapshots
                 WHERE instance_id = ?1
                 ORDER BY id ASC",
            )?;

            let mut rows = stmt.query(params![instance_id])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(row_to_snapshot(row)?);
            }

            Ok(records)
        })
        .await
    }

    /// Most recent ranking selections, newest first.
    pub async fn recent_rankings(&self, limit: usize) -> Result<Vec<Stored<RankingRecord>>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM ranking_selected
                 ORDER BY id DESC
                 LIMIT ?1",
            )?;

            let mut rows = stmt.query(params![limit])?;
            let mut rankings = Vec::new();
            while let Some(row) = rows.next()? {
                rankings.push(row_to_ranking(row)?);
            }

            Ok(rankings)
        })
        .await
    }
}
