use serde::{Deserialize, Serialize};

/// Anything that can be logged as an event: a stable numeric id plus a name
/// for the verbose dump.
pub trait EventEnum {
    fn id(&self) -> i32;

    fn name(&self) -> String {
        self.id().to_string()
    }
}

impl EventEnum for i32 {
    fn id(&self) -> i32 {
        *self
    }
}

macro_rules! launcher_events {
    ($($variant:ident = $id:expr => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum LauncherEvent {
            $($variant,)*
        }

        impl LauncherEvent {
            pub const ALL: &'static [LauncherEvent] = &[$(LauncherEvent::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(LauncherEvent::$variant => $name,)*
                }
            }
        }

        impl EventEnum for LauncherEvent {
            fn id(&self) -> i32 {
                match self {
                    $(LauncherEvent::$variant => $id,)*
                }
            }

            fn name(&self) -> String {
                self.as_str().to_string()
            }
        }
    };
}

launcher_events! {
    Ignore = -1 => "IGNORE",
    AppLaunchTap = 338 => "LAUNCHER_APP_LAUNCH_TAP",
    TaskLaunchSwipeDown = 339 => "LAUNCHER_TASK_LAUNCH_SWIPE_DOWN",
    TaskLaunchTap = 340 => "LAUNCHER_TASK_LAUNCH_TAP",
    QuickswitchLeft = 371 => "LAUNCHER_QUICKSWITCH_LEFT",
    QuickswitchRight = 372 => "LAUNCHER_QUICKSWITCH_RIGHT",
    SwipedownNavbar = 373 => "LAUNCHER_SWIPEDOWN_NAVBAR",
    HomeGesture = 374 => "LAUNCHER_HOME_GESTURE",
    OverviewGesture = 375 => "LAUNCHER_OVERVIEW_GESTURE",
    ItemDragStarted = 383 => "LAUNCHER_ITEM_DRAG_STARTED",
    ItemDropCompleted = 385 => "LAUNCHER_ITEM_DROP_COMPLETED",
    FolderLabelUpdated = 460 => "LAUNCHER_FOLDER_LABEL_UPDATED",
    TaskDismissSwipeUp = 515 => "LAUNCHER_TASK_DISMISS_SWIPE_UP",
    NotificationLaunchTap = 516 => "LAUNCHER_NOTIFICATION_LAUNCH_TAP",
}

/// Launcher UI states used for the `src_state` / `dst_state` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LauncherState {
    Background,
    Home,
    Overview,
    AllApps,
    Unchanged,
}

impl LauncherState {
    pub fn code(&self) -> i32 {
        match self {
            LauncherState::Background => 0,
            LauncherState::Home => 1,
            LauncherState::Overview => 2,
            LauncherState::AllApps => 3,
            LauncherState::Unchanged => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(LauncherState::Background),
            1 => Some(LauncherState::Home),
            2 => Some(LauncherState::Overview),
            3 => Some(LauncherState::AllApps),
            4 => Some(LauncherState::Unchanged),
            _ => None,
        }
    }

    /// Label for the verbose dump; unknown codes read as `INVALID`.
    pub fn label(code: i32) -> &'static str {
        match Self::from_code(code) {
            Some(LauncherState::Background) => "BACKGROUND",
            Some(LauncherState::Home) => "HOME",
            Some(LauncherState::Overview) => "OVERVIEW",
            Some(LauncherState::AllApps) => "ALLAPPS",
            Some(LauncherState::Unchanged) | None => "INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        let mut ids: Vec<i32> = LauncherEvent::ALL.iter().map(EventEnum::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), LauncherEvent::ALL.len());
    }

    #[test]
    fn state_codes_round_trip_and_unknown_is_invalid() {
        for state in [
            LauncherState::Background,
            LauncherState::Home,
            LauncherState::Overview,
            LauncherState::AllApps,
        ] {
            assert_eq!(LauncherState::from_code(state.code()), Some(state));
        }
        assert_eq!(LauncherState::label(42), "INVALID");
        assert_eq!(LauncherState::label(1), "HOME");
    }
}
