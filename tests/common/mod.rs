#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use launchstats_lib::{
    models::{container_id, AppTarget, InstanceIdSource, ShortcutTarget, WidgetTarget},
    resolver::ResolverTask,
    BgDataModel, ContainerResolver, FolderInfo, InstanceId, ItemInfo, ItemKind, ModelWorker,
};

/// Delegates to a real model worker and counts enqueued tasks.
pub struct CountingResolver {
    pub worker: ModelWorker,
    enqueued: AtomicUsize,
}

impl CountingResolver {
    pub fn start(model: BgDataModel) -> Arc<Self> {
        Arc::new(Self {
            worker: ModelWorker::start(model).unwrap(),
            enqueued: AtomicUsize::new(0),
        })
    }

    pub fn enqueued(&self) -> usize {
        self.enqueued.load(Ordering::SeqCst)
    }
}

impl ContainerResolver for CountingResolver {
    fn enqueue(&self, task: ResolverTask) {
        self.enqueued.fetch_add(1, Ordering::SeqCst);
        self.worker.enqueue(task);
    }
}

/// Always hands out the same correlation id.
pub struct FixedIds(pub i32);

impl InstanceIdSource for FixedIds {
    fn new_instance_id(&self) -> InstanceId {
        InstanceId::fake(self.0)
    }
}

pub fn app(id: i32, container: i32) -> ItemInfo {
    ItemInfo::new(
        id,
        container,
        ItemKind::Application(AppTarget {
            package_name: format!("com.example.app{id}"),
            component_name: format!("com.example.app{id}/.MainActivity"),
        }),
    )
}

pub fn shortcut(id: i32, container: i32, name: &str) -> ItemInfo {
    ItemInfo::new(
        id,
        container,
        ItemKind::Shortcut(ShortcutTarget {
            shortcut_name: name.to_string(),
        }),
    )
}

pub fn widget(id: i32) -> ItemInfo {
    ItemInfo::new(
        id,
        container_id::DESKTOP,
        ItemKind::Widget(WidgetTarget {
            package_name: "com.example.weather".into(),
            component_name: "com.example.weather/.Widget".into(),
            span_x: 4,
            span_y: 2,
        }),
    )
    .at(1, 0, 0)
}

/// Two desktop apps, a desktop folder (id 5) with three apps, and a widget.
pub fn sample_model() -> BgDataModel {
    let mut model = BgDataModel::new();
    model.add_workspace_item(app(1, container_id::DESKTOP).at(0, 0, 0));
    model.add_workspace_item(app(2, container_id::HOTSEAT).at(0, 3, 0));

    let mut folder = FolderInfo::new(5, container_id::DESKTOP)
        .at(0, 2, 3)
        .titled("Social");
    for (i, id) in [10, 11, 12].into_iter().enumerate() {
        let cell = i32::try_from(i).unwrap();
        folder.contents.push(app(id, 5).at(0, cell, 0).with_rank(cell));
    }
    model.put_folder(folder);

    model.add_app_widget(widget(20));
    model
}
