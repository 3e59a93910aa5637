use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use thiserror::Error;

use crate::runtime::AppEvent;

/// Sessions shipped with the binary, used when no file exists on disk
static BUNDLED_WORKOUTS: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/workouts");

pub const WORKOUTS_DIR: &str = "workouts";

/// Descriptive workout session read from a static file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub workout: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session name `{0}`")]
    InvalidName(String),
    #[error("session `{0}` not found")]
    NotFound(String),
    #[error("failed to read session `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed session `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of workout sessions
pub trait SessionLoader: Send + 'static {
    fn fetch(&self, name: &str) -> Result<WorkoutSession, SessionError>;
}

/// Reads `<root>/workouts/<name>`, falling back to the bundled sessions
#[derive(Debug, Clone)]
pub struct FileSessionLoader {
    root: PathBuf,
    bundled: bool,
}

impl FileSessionLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            bundled: true,
        }
    }

    /// Only look on disk
    pub fn without_bundled(mut self) -> Self {
        self.bundled = false;
        self
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(WORKOUTS_DIR).join(name)
    }
}

impl SessionLoader for FileSessionLoader {
    fn fetch(&self, name: &str) -> Result<WorkoutSession, SessionError> {
        validate_name(name)?;

        match fs::read(self.resolve(name)) {
            Ok(bytes) => parse(name, &bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match BUNDLED_WORKOUTS.get_file(name).filter(|_| self.bundled) {
                    Some(file) => parse(name, file.contents()),
                    None => Err(SessionError::NotFound(name.to_string())),
                }
            }
            Err(source) => Err(SessionError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}

/// Names of the sessions compiled into the binary
pub fn bundled_session_names() -> Vec<String> {
    let mut names: Vec<String> = BUNDLED_WORKOUTS
        .files()
        .filter_map(|f| f.path().file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Fetch a session on a background thread and post the result as an event.
///
/// Fire and forget: if the receiver is gone the result is dropped.
pub fn spawn_fetch<L: SessionLoader>(
    loader: L,
    name: String,
    tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = loader.fetch(&name);
        let _ = tx.send(AppEvent::SessionLoaded { name, result });
    })
}

fn validate_name(name: &str) -> Result<(), SessionError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(SessionError::InvalidName(name.to_string())),
    }
}

fn parse(name: &str, bytes: &[u8]) -> Result<WorkoutSession, SessionError> {
    serde_json::from_slice(bytes).map_err(|source| SessionError::Parse {
        name: name.to_string(),
        source,
    })
}
