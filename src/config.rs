use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::{PlanConfig, DEFAULT_ACTIVE_SECS, DEFAULT_EXERCISES, DEFAULT_REST_SECS};

/// Persisted defaults; command line flags override these
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub active_secs: u64,
    pub rest_secs: u64,
    pub leading_break: bool,
    pub exercises: Vec<String>,
    pub mute: bool,
    /// Session file to read from the workouts directory on startup
    pub session: Option<String>,
    pub workouts_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_secs: DEFAULT_ACTIVE_SECS,
            rest_secs: DEFAULT_REST_SECS,
            leading_break: false,
            exercises: DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect(),
            mute: false,
            session: None,
            workouts_root: None,
        }
    }
}

impl Config {
    pub fn plan_config(&self) -> PlanConfig {
        PlanConfig {
            active_secs: self.active_secs,
            rest_secs: self.rest_secs,
            leading_break: self.leading_break,
            exercises: self.exercises.clone(),
            ..PlanConfig::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "sevenmin") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("sevenmin_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("ignoring malformed config {}: {e}", self.path.display());
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
