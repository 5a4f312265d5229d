//! In-memory agent repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// Stores encoded agents in a shared map instead of on disk.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents currently stored.
    pub fn count(&self) -> usize {
        self.lock().map_or(0, |storage| storage.len())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock()
            .is_ok_and(|storage| storage.contains_key(&key(path)))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.storage.lock().map_err(|_| Error::LockPoisoned {
            operation: "access in-memory agent storage".to_string(),
        })
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let bytes = agent.to_bytes()?;
        self.lock()?.insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let storage = self.lock()?;
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;
        SavedAgent::from_bytes(bytes)
    }
}
