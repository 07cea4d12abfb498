use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::error::{Result, WardenError};
use crate::model::AgentStatus;
use crate::store::lock::ProcessMutex;
use crate::store::state::StateStore;
use crate::store::{SENTINEL_FILE, STATE_DIR, STATE_FILE};

/// Informational board of per-agent declared focus, sharing the same state
/// document (and ProcessMutex discipline) as the lock records, so a status
/// update and a lock mutation can never interleave into a partial write.
///
/// No conflict semantics: agents may declare any focus freely.
pub struct StatusBoard {
    state: StateStore,
    mutex: ProcessMutex,
}

impl StatusBoard {
    /// Board over `<root>/.warden/`, the same files used by the coordinator.
    pub fn open(root: &Path) -> Self {
        let dir = root.join(STATE_DIR);
        Self {
            state: StateStore::new(dir.join(STATE_FILE)),
            mutex: ProcessMutex::new(dir.join(SENTINEL_FILE)),
        }
    }

    /// Record an agent's focus and context fingerprint, fully replacing any
    /// prior record for the same agent (no history).
    pub fn update(
        &self,
        agent: &str,
        focus: &str,
        context_hash: &str,
        notes: Option<&str>,
    ) -> Result<AgentStatus> {
        if agent.is_empty() {
            return Err(WardenError::InvalidName(agent.to_string()));
        }

        let _guard = self.mutex.acquire()?;
        let mut state = self.state.load();

        state.agents.retain(|rec| rec.agent != agent);
        let status = AgentStatus {
            agent: agent.to_string(),
            focus: focus.to_string(),
            context_hash: context_hash.to_string(),
            updated_at: Utc::now(),
            notes: notes.map(|s| s.to_string()),
        };
        state.agents.push(status.clone());

        self.state.save(&state)?;
        Ok(status)
    }

    /// Snapshot of all declared statuses, ordered by agent id for stable
    /// display. Read-only; not serialized against writers.
    pub fn list(&self) -> Vec<AgentStatus> {
        let mut agents = self.state.load().agents;
        agents.sort_by(|a, b| a.agent.cmp(&b.agent));
        agents
    }
}

/// Compute a cheap fingerprint from file metadata (name, size, mtime).
/// Stat calls only, no reads; detects additions, deletions, and in-place
/// edits. Nanosecond mtime catches rapid same-size edits. Missing paths
/// contribute a fixed marker so presence changes alter the fingerprint.
pub fn context_fingerprint(paths: &[String]) -> Result<String> {
    let mut entries = Vec::new();
    for path in paths {
        match fs::metadata(path) {
            Ok(meta) => {
                let mtime = meta
                    .modified()?
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_nanos();
                entries.push(format!("{path}:{}:{mtime}", meta.len()));
            }
            Err(_) => entries.push(format!("{path}:absent")),
        }
    }
    entries.sort();
    Ok(entries.join(","))
}
