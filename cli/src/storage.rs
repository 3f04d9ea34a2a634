//! JSON file backing for the persisted session.
//!
//! The file holds a flat string map with the same two entries the browser
//! keeps in `localStorage`. Every write replaces the whole file through a
//! sibling temp file and a rename, so a crash mid-write leaves the previous
//! contents intact.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use session::{SessionStorage, StorageError};

const SESSION_FILE: &str = "session.json";

type Entries = BTreeMap<String, String>;

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `session.json` under the platform config directory, if one exists.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gecos").map(|dirs| dirs.config_dir().join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unparseable files read as empty.
    fn entries(&self) -> Entries {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Entries::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "session file unreadable");
                return Entries::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "session file is not a string map");
            Entries::new()
        })
    }

    fn persist(&self, entries: &Entries) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;

        let mut tmp_name = self.path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        let mut file = open_private(&tmp)?;
        file.write_all(rendered.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().remove(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries).map_err(|e| StorageError::Write {
            key: key.to_owned(),
            reason: e.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).map_err(|e| StorageError::Remove {
            key: key.to_owned(),
            reason: e.to_string(),
        })
    }
}
