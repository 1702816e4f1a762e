use std::sync::{Arc, Mutex};

use crate::stats::record::{EventRecord, RankingRecord, SnapshotRecord, StatsAtom};

/// Write side of the stats aggregation service. Fire-and-forget: failures are
/// the sink's business and never reach the logging caller.
pub trait StatsSink: Send + Sync {
    fn write(&self, atom: StatsAtom);
}

/// Keeps every written atom in memory, in write order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    atoms: Arc<Mutex<Vec<StatsAtom>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atoms(&self) -> Vec<StatsAtom> {
        match self.atoms.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.atoms().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.atoms()
            .into_iter()
            .filter_map(|atom| match atom {
                StatsAtom::Event(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn snapshots(&self) -> Vec<SnapshotRecord> {
        self.atoms()
            .into_iter()
            .filter_map(|atom| match atom {
                StatsAtom::Snapshot(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn rankings(&self) -> Vec<RankingRecord> {
        self.atoms()
            .into_iter()
            .filter_map(|atom| match atom {
                StatsAtom::Ranking(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        match self.atoms.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl StatsSink for MemorySink {
    fn write(&self, atom: StatsAtom) {
        match self.atoms.lock() {
            Ok(mut guard) => guard.push(atom),
            Err(poisoned) => poisoned.into_inner().push(atom),
        }
    }
}
