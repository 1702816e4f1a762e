use std::sync::Arc;

use crate::{
    log_verbose,
    models::{
        ContainerInfo, EventEnum, InstanceId, InstanceIdSequence, InstanceIdSource,
        ItemDescription, ItemInfo, LauncherState,
    },
    resolver::{ContainerResolver, ModelSnapshot},
    settings::StatsSettings,
    sink::StatsSink,
};

use super::{
    extract::extract,
    gate::{FeatureGate, PlatformGate},
    logger::StatsLogger,
    record::{EventHeader, EventRecord, RankingRecord, SnapshotRecord, StatsAtom},
};

/// Which path a logged event took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The sink is unavailable on this platform; nothing was written.
    Skipped,
    /// Extracted and written on the caller's thread.
    Emitted,
    /// Handed to the resolver; written later, or dropped if the folder is gone.
    Queued,
}

/// Feature gate, sink and verbose flag: everything needed to write a record.
/// Cheap to clone into resolver tasks.
#[derive(Clone)]
struct Emitter {
    sink: Arc<dyn StatsSink>,
    gate: Arc<dyn FeatureGate>,
    verbose: bool,
}

impl Emitter {
    fn available(&self) -> bool {
        self.gate.sink_available()
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    /// Extracts and writes one event.
    fn write_event(
        &self,
        event_name: &str,
        header: EventHeader,
        item: &ItemDescription,
        container: &ContainerInfo,
    ) {
        let record = EventRecord::new(header, extract(item, container));
        if header.instance_id == InstanceId::DEFAULT.id() {
            log_verbose!(
                self.verbose,
                "\n{} (State:{}->{})\n{:?}",
                event_name,
                LauncherState::label(header.src_state),
                LauncherState::label(header.dst_state),
                record
            );
        } else {
            log_verbose!(
                self.verbose,
                "\n{} (State:{}->{}) (InstanceId:{})\n{:?}",
                event_name,
                LauncherState::label(header.src_state),
                LauncherState::label(header.dst_state),
                header.instance_id,
                record
            );
        }
        self.write(StatsAtom::Event(record));
    }

    fn write_snapshot(
        &self,
        instance_id: InstanceId,
        item: &ItemDescription,
        container: &ContainerInfo,
    ) {
        let record = SnapshotRecord::new(instance_id.id(), extract(item, container));
        log_verbose!(self.verbose, "\nwriteSnapshot({}):\n{:?}", instance_id, record);
        self.write(StatsAtom::Snapshot(record));
    }

    fn write(&self, atom: StatsAtom) {
        if !self.available() {
            return;
        }
        self.sink.write(atom);
    }
}

/// Entry point for launcher telemetry.
///
/// Items whose container is a well-known negative id are written on the
/// caller's thread. Items inside a folder only know the folder id, so the
/// folder is looked up on the model's resolver queue and the record is
/// written from there. No entry point reports errors: a closed feature gate
/// skips the write and an unresolvable folder drops the event.
#[derive(Clone)]
pub struct StatsLogManager {
    emitter: Emitter,
    resolver: Arc<dyn ContainerResolver>,
    instance_ids: Arc<dyn InstanceIdSource>,
}

impl StatsLogManager {
    /// A manager with the gate open, verbose dump off, and random snapshot ids.
    pub fn new(sink: Arc<dyn StatsSink>, resolver: Arc<dyn ContainerResolver>) -> Self {
        Self {
            emitter: Emitter {
                sink,
                gate: Arc::new(true),
                verbose: false,
            },
            resolver,
            instance_ids: Arc::new(InstanceIdSequence::default()),
        }
    }

    pub fn from_settings(
        settings: &StatsSettings,
        sink: Arc<dyn StatsSink>,
        resolver: Arc<dyn ContainerResolver>,
    ) -> Self {
        Self::new(sink, resolver)
            .with_gate(Arc::new(PlatformGate::new(settings.platform_api_level)))
            .with_verbose(settings.verbose)
            .with_instance_ids(Arc::new(InstanceIdSequence::new(settings.instance_id_max)))
    }

    pub fn with_gate(mut self, gate: Arc<dyn FeatureGate>) -> Self {
        self.emitter.gate = gate;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.emitter.verbose = verbose;
        self
    }

    pub fn with_instance_ids(mut self, instance_ids: Arc<dyn InstanceIdSource>) -> Self {
        self.instance_ids = instance_ids;
        self
    }

    /// A fresh builder bound to this manager.
    pub fn logger(&self) -> StatsLogger {
        StatsLogger::new(self.clone())
    }

    /// Writes `item` through the resolver queue so the record is ordered after
    /// pending model updates. Uses the default Home → Background transition.
    pub fn log_ordered(
        &self,
        event: &dyn EventEnum,
        instance_id: InstanceId,
        item: ItemDescription,
        container: ContainerInfo,
    ) -> Dispatch {
        if !self.emitter.available() {
            return Dispatch::Skipped;
        }

        let emitter = self.emitter.clone();
        let event_id = event.id();
        let event_name = event.name();
        self.resolver.enqueue(Box::new(move |_snapshot| {
            let header = EventHeader {
                event_id,
                instance_id: instance_id.id(),
                src_state: LauncherState::Home.code(),
                dst_state: LauncherState::Background.code(),
                rank: None,
            };
            emitter.write_event(&event_name, header, &item, &container);
        }));
        Dispatch::Queued
    }

    /// Writes an event with an explicit state transition on the caller's
    /// thread. `None` logs an empty item description.
    pub fn log_transition(
        &self,
        event: &dyn EventEnum,
        item: Option<(ItemDescription, ContainerInfo)>,
        src_state: LauncherState,
        dst_state: LauncherState,
    ) -> Dispatch {
        if !self.emitter.available() {
            return Dispatch::Skipped;
        }

        let (item, container) = item.unwrap_or_default();
        let header = EventHeader {
            event_id: event.id(),
            instance_id: InstanceId::DEFAULT.id(),
            src_state: src_state.code(),
            dst_state: dst_state.code(),
            rank: None,
        };
        self.emitter
            .write_event(&event.name(), header, &item, &container);
        Dispatch::Emitted
    }

    /// Writes a "ranked result picked" signal. No item hierarchy is involved.
    pub fn log_ranking(
        &self,
        event: &dyn EventEnum,
        instance_id: InstanceId,
        package_name: Option<&str>,
        position: i32,
    ) -> Dispatch {
        if !self.emitter.available() {
            return Dispatch::Skipped;
        }

        let record = RankingRecord {
            event_id: event.id(),
            package_name: package_name.map(str::to_string),
            instance_id: instance_id.id(),
            position,
        };
        log_verbose!(self.emitter.verbose(), "\n{} ranking\n{:?}", event.name(), record);
        self.emitter.write(StatsAtom::Ranking(record));
        Dispatch::Emitted
    }

    /// Dumps the whole model: workspace items, the contents of every folder,
    /// then app widgets, all under one freshly minted correlation id.
    pub fn log_snapshot(&self) -> InstanceId {
        let instance_id = self.instance_ids.new_instance_id();
        if !self.emitter.available() {
            return instance_id;
        }

        let emitter = self.emitter.clone();
        self.resolver.enqueue(Box::new(move |snapshot| {
            walk_snapshot(&emitter, instance_id, snapshot);
        }));
        instance_id
    }

    /// Resolves `item`'s container and writes the event, on the caller's
    /// thread or through the resolver.
    pub(crate) fn dispatch(
        &self,
        event: &dyn EventEnum,
        item: ItemInfo,
        header: EventHeader,
    ) -> Dispatch {
        if !self.emitter.available() {
            return Dispatch::Skipped;
        }

        if !item.needs_container_lookup() {
            let container = item.container_info(None);
            self.emitter
                .write_event(&event.name(), header, &item.describe(), &container);
            return Dispatch::Emitted;
        }

        let emitter = self.emitter.clone();
        let event_name = event.name();
        self.resolver.enqueue(Box::new(move |snapshot| {
            let Some(folder) = snapshot.folder(item.container) else {
                log_verbose!(
                    emitter.verbose(),
                    "dropping {}: folder {} no longer exists (item {})",
                    event_name,
                    item.container,
                    item.id
                );
                return;
            };
            let container = item.container_info(Some(folder));
            emitter.write_event(&event_name, header, &item.describe(), &container);
        }));
        Dispatch::Queued
    }
}

fn walk_snapshot(emitter: &Emitter, instance_id: InstanceId, snapshot: &ModelSnapshot) {
    for item in &snapshot.workspace_items {
        emitter.write_snapshot(instance_id, &item.describe(), &item.container_info(None));
    }
    for folder in snapshot.folders.values() {
        let parent = folder.parent_container();
        for item in &folder.contents {
            emitter.write_snapshot(instance_id, &item.describe(), &item.container_in(parent));
        }
    }
    for widget in &snapshot.app_widgets {
        emitter.write_snapshot(instance_id, &widget.describe(), &widget.container_info(None));
    }
}
