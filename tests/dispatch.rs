//! Dispatch paths of the stats logger: synchronous emission, folder
//! resolution through the model worker, and the feature gate.

mod common;

use std::sync::{mpsc, Arc, Mutex};

use common::{app, sample_model, shortcut, CountingResolver};
use launchstats_lib::{
    models::{container_id, GridPosition, ParentContainer},
    stats::FOLDER_HIERARCHY_OFFSET,
    BgDataModel, ContainerInfo, ContainerResolver, Dispatch, FolderInfo, InstanceId,
    ItemDescription, LauncherEvent, LauncherState, MemorySink, StatsAtom, StatsLogManager,
    StatsSink,
};

fn manager(sink: &MemorySink, resolver: &Arc<CountingResolver>) -> StatsLogManager {
    StatsLogManager::new(Arc::new(sink.clone()), resolver.clone())
}

#[tokio::test]
async fn negative_container_is_emitted_synchronously() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = manager(&sink, &resolver);

    for container in [container_id::NO_ID, container_id::DESKTOP, container_id::HOTSEAT] {
        let dispatch = manager
            .logger()
            .with_item(app(1, container).at(2, 1, 4))
            .log(&LauncherEvent::AppLaunchTap);
        assert_eq!(dispatch, Dispatch::Emitted);
    }

    // Written before any worker round trip.
    assert_eq!(sink.events().len(), 3);
    assert_eq!(resolver.enqueued(), 0);

    let desktop = &sink.events()[1];
    assert_eq!((desktop.grid_x, desktop.grid_y, desktop.page_id), (1, 4, 2));
    assert_eq!(desktop.hierarchy, 1);
}

#[tokio::test]
async fn missing_folder_drops_the_event_quietly() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = manager(&sink, &resolver).with_verbose(true);

    let dispatch = manager
        .logger()
        .with_item(app(1, 5))
        .log(&LauncherEvent::AppLaunchTap);
    assert_eq!(dispatch, Dispatch::Queued);

    resolver.worker.flush().await.unwrap();
    assert_eq!(resolver.enqueued(), 1);
    assert!(sink.is_empty());

    // The worker is still usable after the miss.
    manager
        .logger()
        .with_item(app(2, container_id::DESKTOP))
        .log(&LauncherEvent::AppLaunchTap);
    resolver.worker.flush().await.unwrap();
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn folder_item_is_resolved_on_the_worker() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(sample_model());
    let manager = manager(&sink, &resolver);

    let item = app(11, 5).at(0, 1, 0).with_rank(1);
    let dispatch = manager
        .logger()
        .with_item(item)
        .with_instance_id(InstanceId::fake(77))
        .log(&LauncherEvent::ItemDragStarted);
    assert_eq!(dispatch, Dispatch::Queued);

    resolver.worker.flush().await.unwrap();
    let events = sink.events();
    assert_eq!(events.len(), 1);

    let record = &events[0];
    assert_eq!(record.instance_id, 77);
    assert_eq!((record.grid_x, record.grid_y, record.page_id), (1, 0, 0));
    assert_eq!(
        (record.grid_x_parent, record.grid_y_parent, record.page_id_parent),
        (2, 3, 0)
    );
    assert_eq!(record.hierarchy, FOLDER_HIERARCHY_OFFSET + 4);
    assert_eq!(record.rank, 1);
    assert_eq!(record.package_name.as_deref(), Some("com.example.app11"));
}

#[tokio::test]
async fn folder_added_by_queued_update_is_seen_by_later_log() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = manager(&sink, &resolver);

    resolver.worker.enqueue_update(|model| {
        model.put_folder(FolderInfo::new(9, container_id::HOTSEAT).at(0, 4, 0));
    });
    manager
        .logger()
        .with_item(shortcut(30, 9, "new-message"))
        .log(&LauncherEvent::AppLaunchTap);

    resolver.worker.flush().await.unwrap();
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].hierarchy, FOLDER_HIERARCHY_OFFSET + 5);
    assert_eq!(events[0].grid_x_parent, 4);
    assert_eq!(events[0].component_name.as_deref(), Some("new-message"));
}

#[tokio::test]
async fn closed_gate_skips_every_entry_point() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(sample_model());
    let manager = manager(&sink, &resolver).with_gate(Arc::new(false));

    let desktop = manager
        .logger()
        .with_item(app(1, container_id::DESKTOP))
        .log(&LauncherEvent::AppLaunchTap);
    let folder = manager
        .logger()
        .with_item(app(10, 5))
        .log(&LauncherEvent::AppLaunchTap);
    let ranking = manager.log_ranking(
        &LauncherEvent::AppLaunchTap,
        InstanceId::fake(3),
        Some("com.example.app1"),
        0,
    );
    manager.log_snapshot();

    resolver.worker.flush().await.unwrap();
    assert_eq!(desktop, Dispatch::Skipped);
    assert_eq!(folder, Dispatch::Skipped);
    assert_eq!(ranking, Dispatch::Skipped);
    assert_eq!(resolver.enqueued(), 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn ranking_bypasses_extraction() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = manager(&sink, &resolver);

    manager.log_ranking(&LauncherEvent::AppLaunchTap, InstanceId::fake(42), None, 3);
    manager.log_ranking(
        &LauncherEvent::AppLaunchTap,
        InstanceId::fake(42),
        Some("com.example.app7"),
        0,
    );

    let rankings = sink.rankings();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].event_id, 338);
    assert_eq!(rankings[0].package_name, None);
    assert_eq!(rankings[0].position, 3);
    assert_eq!(rankings[1].package_name.as_deref(), Some("com.example.app7"));
    assert!(sink.events().is_empty());
    assert_eq!(resolver.enqueued(), 0);
}

#[tokio::test]
async fn transition_without_item_logs_empty_description() {
    let sink = MemorySink::new();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = manager(&sink, &resolver);

    manager.log_transition(
        &LauncherEvent::HomeGesture,
        None,
        LauncherState::Overview,
        LauncherState::Home,
    );

    let record = &sink.events()[0];
    assert_eq!(record.target_id, 0);
    assert_eq!(record.hierarchy, 0);
    assert_eq!(record.package_name, None);
    assert_eq!(record.instance_id, InstanceId::DEFAULT.id());
    assert_eq!(record.src_state, LauncherState::Overview.code());
    assert_eq!(record.dst_state, LauncherState::Home.code());
}

/// Records when the model worker reaches each step, sink writes included.
#[derive(Clone, Default)]
struct StepLog(Arc<Mutex<Vec<&'static str>>>);

impl StepLog {
    fn push(&self, step: &'static str) {
        self.0.lock().unwrap().push(step);
    }

    fn steps(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

struct SteppingSink {
    inner: MemorySink,
    steps: StepLog,
}

impl StatsSink for SteppingSink {
    fn write(&self, atom: StatsAtom) {
        self.steps.push("write");
        self.inner.write(atom);
    }
}

#[tokio::test]
async fn ordered_log_runs_after_pending_updates() {
    let sink = MemorySink::new();
    let steps = StepLog::default();
    let resolver = CountingResolver::start(BgDataModel::new());
    let manager = StatsLogManager::new(
        Arc::new(SteppingSink {
            inner: sink.clone(),
            steps: steps.clone(),
        }),
        resolver.clone(),
    );

    // Hold the worker inside an update until the log call has been queued.
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let update_steps = steps.clone();
    resolver.worker.enqueue_update(move |model| {
        let _ = release_rx.recv();
        model.put_folder(FolderInfo::new(7, container_id::DESKTOP).at(0, 3, 3));
        update_steps.push("update");
    });

    let item = ItemDescription {
        rank: 2,
        ..app(1, container_id::DESKTOP).describe()
    };
    let container = ContainerInfo::Folder(launchstats_lib::models::FolderContainer {
        position: GridPosition::new(0, 1, 0),
        parent: Some(ParentContainer::Workspace(GridPosition::new(3, 3, 1))),
    });
    let dispatch = manager.log_ordered(
        &LauncherEvent::ItemDropCompleted,
        InstanceId::fake(5),
        item,
        container,
    );
    assert_eq!(dispatch, Dispatch::Queued);

    let seen_steps = steps.clone();
    let folder_seen = Arc::new(Mutex::new(None));
    let folder_seen_in_task = Arc::clone(&folder_seen);
    resolver.enqueue(Box::new(move |snapshot| {
        *folder_seen_in_task.lock().unwrap() = Some(snapshot.folder(7).is_some());
        seen_steps.push("read");
    }));

    assert!(sink.is_empty());
    release_tx.send(()).unwrap();
    resolver.worker.flush().await.unwrap();

    assert_eq!(steps.steps(), ["update", "write", "read"]);
    assert_eq!(*folder_seen.lock().unwrap(), Some(true));

    let record = &sink.events()[0];
    assert_eq!(record.event_id, 385);
    assert_eq!(record.instance_id, 5);
    assert_eq!(record.rank, 2);
    assert_eq!(record.page_id_parent, 1);
    assert_eq!(record.src_state, LauncherState::Home.code());
    assert_eq!(record.dst_state, LauncherState::Background.code());
}
