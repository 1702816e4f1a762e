use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::{models::INSTANCE_ID_MAX, stats::MIN_SINK_API_LEVEL};

/// Set to `1` or `true` to force the verbose record dump on.
pub const VERBOSE_ENV: &str = "LAUNCHSTATS_VERBOSE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSettings {
    /// Dump every record as text on the `StatsLog` log target.
    pub verbose: bool,
    /// Platform API level the feature gate checks against.
    pub platform_api_level: u32,
    /// Upper bound for snapshot correlation ids.
    pub instance_id_max: i32,
    /// SQLite file used by the CLI sink.
    pub database_file: String,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            platform_api_level: MIN_SINK_API_LEVEL,
            instance_id_max: INSTANCE_ID_MAX,
            database_file: "launchstats.sqlite3".into(),
        }
    }
}

impl StatsSettings {
    /// Applies environment overrides on top of the stored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(VERBOSE_ENV) {
            self.verbose = parse_flag(&value);
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<StatsSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?
        } else {
            StatsSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Stored settings with environment overrides applied.
    pub fn settings(&self) -> Result<StatsSettings> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        Ok(guard.clone().with_env_overrides())
    }

    pub fn update(&self, settings: StatsSettings) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: StatsSettings = serde_json::from_str(&contents)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &StatsSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
