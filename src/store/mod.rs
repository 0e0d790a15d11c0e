use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use crate::models::ProfileId;

mod sqlite;

pub use sqlite::SqliteStore;

/// Namespaced key for one persisted blob. Keys are structured rather than
/// concatenated strings, so per-profile blobs can never collide with the
/// global ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Progress(ProfileId),
    Rewards(ProfileId),
    Profiles,
    Settings,
}

impl StoreKey {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StoreKey::Progress(_) => "progress",
            StoreKey::Rewards(_) => "rewards",
            StoreKey::Profiles => "profiles",
            StoreKey::Settings => "settings",
        }
    }

    pub(crate) fn profile_id(&self) -> &str {
        match self {
            StoreKey::Progress(id) | StoreKey::Rewards(id) => id,
            StoreKey::Profiles | StoreKey::Settings => "",
        }
    }
}

/// Durable key-value storage for opaque JSON blobs. Implementations are
/// synchronous; callers treat failures as non-fatal and keep their
/// in-memory state authoritative.
pub trait BlobStore {
    fn load(&self, key: &StoreKey) -> Result<Option<String>>;
    fn save(&self, key: &StoreKey, value: &str) -> Result<()>;
    fn delete(&self, key: &StoreKey) -> Result<()>;
}

/// In-memory backend for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value directly, bypassing the engine. Lets tests seed
    /// malformed blobs.
    pub fn put_raw(&self, key: StoreKey, value: impl Into<String>) {
        self.blobs.borrow_mut().insert(key, value.into());
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &StoreKey) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&self, key: &StoreKey, value: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.clone(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &StoreKey) -> Result<()> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}
