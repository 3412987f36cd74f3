//! Storage backends for the log store.
//!
//! The log store persists its entries through a single key-value slot. This
//! module defines the slot abstraction and two implementations: a file-based
//! backend for durable storage under the user's config directory, and an
//! in-memory backend for tests and ephemeral use.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

/// A key-value slot the log store reads and writes.
///
/// Implementations only need to round-trip whole string values; the store
/// owns serialization, capacity, and ordering on top of this.
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes the value under `key`. Removing an absent slot succeeds.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-based backend storing each slot as a JSON file in one directory.
///
/// The default directory is `~/.config/api-inspector` (or the roaming
/// profile equivalent on Windows), created on first write.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at the default config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> io::Result<Self> {
        let config_dir = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config")
        } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
            PathBuf::from(user_profile).join("AppData").join("Roaming")
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            ));
        };

        Ok(Self {
            dir: config_dir.join("api-inspector"),
        })
    }

    /// Creates a backend rooted at an explicit directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the slot files
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path).map(Some)
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.slot_path(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory backend backed by a lock-guarded map.
///
/// Used by tests and by callers that want observability without durable
/// storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "slot lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "slot lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "slot lock poisoned"))?;
        slots.remove(key);
        Ok(())
    }
}
