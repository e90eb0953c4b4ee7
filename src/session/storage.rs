//! Durable session persistence.
//!
//! Two stable keys survive application restarts: the bearer token and the
//! serialized user snapshot. The store writes and clears them together;
//! a lone value never appears through this layer.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;

/// Storage key for the bearer token (plain string).
pub const TOKEN_KEY: &str = "police_ops_token";

/// Storage key for the serialized user snapshot (JSON text).
pub const USER_KEY: &str = "police_ops_user";

/// Key-value persistence behind the session store.
///
/// Access is synchronous and local; implementations must tolerate
/// concurrent readers.
pub trait SessionStorage: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key storage rooted in a local directory.
#[derive(Debug)]
pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    /// Open (or create) storage rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create session directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Storage under `~/.police-ops`.
    pub fn open_default() -> Result<Self> {
        let home = directories::UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("could not resolve home directory"))?;
        Self::open(home.join(".police-ops"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStorage for DiskStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.key_path(key), value)
            .with_context(|| format!("failed to write session key {key}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove session key {key}")),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().remove(key);
        Ok(())
    }
}
