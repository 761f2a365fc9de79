use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use tracing::warn;

use crate::{
    models::timer::{Timer, TimerFile},
    Result,
};

/// In-memory timer registry backed by a single JSON file. Every mutation
/// rewrites the whole file, so registry and disk agree after each call.
#[derive(Debug)]
pub struct TimerStore {
    path: PathBuf,
    next_id: u64,
    timers: BTreeMap<u64, Timer>,
}

impl TimerStore {
    /// Load the store from `path`. A missing or unreadable file is treated
    /// as "no timers yet".
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<TimerFile>(&content).unwrap_or_else(|e| {
                warn!("Corrupt timer file {}, starting empty: {e}", path.display());
                TimerFile::default()
            }),
            Err(_) => TimerFile::default(),
        };

        Self {
            path,
            next_id: file.next_timer_id,
            timers: file.timers.into_iter().map(|t| (t.timer_id, t)).collect(),
        }
    }

    /// Allocate the next ID, store the record and persist. The caller is
    /// responsible for rejecting past target timestamps.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &mut self,
        channel_id: u64,
        message_id: u64,
        text: String,
        target_timestamp: i64,
        tz_offset: i8,
        pinned: bool,
    ) -> Result<u64> {
        let timer_id = self.next_id;
        self.next_id += 1;

        self.timers.insert(
            timer_id,
            Timer {
                timer_id,
                channel_id,
                message_id,
                text,
                target_timestamp,
                tz_offset,
                pinned,
            },
        );
        self.save()?;

        Ok(timer_id)
    }

    /// Remove a timer by ID and persist. A missing ID is a no-op; returns
    /// whether anything was removed.
    pub fn delete(&mut self, timer_id: u64) -> Result<bool> {
        let removed = self.timers.remove(&timer_id).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn get(&self, timer_id: u64) -> Option<&Timer> {
        self.timers.get(&timer_id)
    }

    /// Snapshot of every registered timer, ordered by ID.
    pub fn all(&self) -> Vec<Timer> {
        self.timers.values().cloned().collect()
    }

    pub fn in_channel(&self, channel_id: u64) -> Vec<Timer> {
        self.timers
            .values()
            .filter(|t| t.channel_id == channel_id)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn save(&self) -> Result<()> {
        let file = TimerFile {
            next_timer_id: self.next_id,
            timers: self.timers.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> TimerStore {
        TimerStore::load(dir.path().join("timers.json"))
    }

    fn add(store: &mut TimerStore, channel_id: u64) -> u64 {
        store
            .create(channel_id, 10, "test".into(), 2_000_000_000, 3, false)
            .unwrap()
    }

    #[test]
    fn ids_are_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let a = add(&mut store, 1);
        let b = add(&mut store, 1);
        let c = add(&mut store, 2);
        assert!(a < b && b < c);

        // Deleting must not free IDs for reuse.
        store.delete(c).unwrap();
        let d = add(&mut store, 2);
        assert!(d > c);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        let id = add(&mut store, 1);
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(!store.delete(9999).unwrap());
    }

    #[test]
    fn reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");

        let mut store = TimerStore::load(&path);
        store
            .create(5, 6, "new year".into(), 1_900_000_000, 2, true)
            .unwrap();
        store
            .create(7, 8, "raid".into(), 1_950_000_000, -5, false)
            .unwrap();
        let before = store.all();

        let reloaded = TimerStore::load(&path);
        assert_eq!(reloaded.all(), before);
        assert_eq!(reloaded.next_id, store.next_id);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timers.json");
        fs::write(&path, "{not json").unwrap();

        let store = TimerStore::load(&path);
        assert!(store.is_empty());
        assert_eq!(store.next_id, 1);
    }

    #[test]
    fn channel_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        add(&mut store, 1);
        add(&mut store, 2);
        add(&mut store, 1);

        assert_eq!(store.in_channel(1).len(), 2);
        assert_eq!(store.in_channel(3).len(), 0);
    }
}
