use directories::ProjectDirs;
use std::path::PathBuf;

const LOG_FILE: &str = "sevenmin.log";

/// Where sevenmin keeps its runtime files
pub struct AppDirs;

impl AppDirs {
    /// Log file under the platform state dir, e.g. `~/.local/state/sevenmin`.
    /// Platforms without a state dir get the cache dir instead.
    pub fn log_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sevenmin")?;
        let dir = dirs.state_dir().unwrap_or_else(|| dirs.cache_dir());
        Some(dir.join(LOG_FILE))
    }
}
