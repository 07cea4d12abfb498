use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::model::{AgentStatus, SyncState};

/// On-disk shapes the loader accepts. Legacy writers persisted a bare JSON
/// array of agent statuses; it upgrades to the current document with no
/// locks. Resolved once here, never downstream.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDoc {
    Current(SyncState),
    Legacy(Vec<AgentStatus>),
}

/// Loads and persists the shared coordination document.
///
/// Reads are defensive: a missing or malformed file degrades to an empty
/// document rather than failing the caller. Writes go through a
/// temp-file-then-rename sequence so a concurrent reader never observes a
/// partially written file.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document. Absent file, unreadable content, and
    /// malformed JSON all yield an empty state; a legacy bare array is
    /// reinterpreted as `{agents: array, locks: []}`.
    pub fn load(&self) -> SyncState {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return SyncState::default();
        };
        match serde_json::from_str::<StoredDoc>(&content) {
            Ok(StoredDoc::Current(state)) => state,
            Ok(StoredDoc::Legacy(agents)) => SyncState {
                agents,
                locks: Vec::new(),
            },
            Err(_) => SyncState::default(),
        }
    }

    /// Persist the document atomically. The rename is the only mutation of
    /// the canonical path, so I/O failures leave the prior state intact.
    pub fn save(&self, state: &SyncState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LockRecord;
    use chrono::Utc;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> StateStore {
        StateStore::new(dir.join(".warden").join("sync.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        let state = store.load();
        assert!(state.agents.is_empty());
        assert!(state.locks.is_empty());
    }

    #[test]
    fn save_creates_parent_and_round_trips() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let state = SyncState {
            agents: vec![],
            locks: vec![LockRecord {
                file: "src/app.py".into(),
                agent_id: "codex".into(),
                task_id: "T-1".into(),
                locked_at: Utc::now(),
            }],
        };
        store.save(&state).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load(), state);
    }

    #[test]
    fn malformed_json_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "NOT VALID JSON").unwrap();

        let state = store.load();
        assert!(state.agents.is_empty());
        assert!(state.locks.is_empty());
    }

    #[test]
    fn legacy_bare_array_upgrades_to_agents() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[{"agent": "codex", "focus": "auth", "context_hash": "abc",
                 "updated_at": "2026-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let state = store.load();
        assert_eq!(state.agents.len(), 1);
        assert_eq!(state.agents[0].agent, "codex");
        assert!(state.locks.is_empty());
    }

    #[test]
    fn save_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let state = SyncState {
            agents: vec![],
            locks: vec![LockRecord {
                file: "a".into(),
                agent_id: "codex".into(),
                task_id: "T-1".into(),
                locked_at: Utc::now(),
            }],
        };
        store.save(&state).unwrap();
        store.save(&state).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, state);
        assert_eq!(loaded.locks.len(), 1);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save(&SyncState::default()).unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("sync.json")]);
    }

    #[test]
    fn output_is_human_diffable_json() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save(&SyncState::default()).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&content).unwrap();
    }
}
