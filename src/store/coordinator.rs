use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;

use crate::error::{Result, WardenError};
use crate::model::{LockRecord, SyncState};
use crate::paths;
use crate::store::conflict;
use crate::store::lock::ProcessMutex;
use crate::store::state::StateStore;
use crate::store::{SENTINEL_FILE, STATE_DIR, STATE_FILE};

/// Result of an acquisition attempt. A blocked request is a normal outcome,
/// not an error: the records name the blocking file and its holder so a
/// human can decide whether to wait, negotiate, or force-release.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquireOutcome {
    /// Lock records newly appended by this call. Empty when every requested
    /// file was already held by the same (agent, task) pair.
    Acquired(Vec<LockRecord>),
    /// Records held by a different (agent, task) pair that blocked the
    /// whole request. Nothing was persisted.
    Blocked(Vec<LockRecord>),
}

impl AcquireOutcome {
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired(_))
    }
}

/// Conflict-aware acquire/release/query operations over the shared state
/// document. Construct one per process and pass it to collaborators; there
/// is no hidden global instance.
///
/// Every mutation runs its whole read-modify-write window under the
/// [`ProcessMutex`], so multi-file acquisitions are atomic with respect to
/// other acquirers across processes.
pub struct Coordinator {
    state: StateStore,
    mutex: ProcessMutex,
}

impl Coordinator {
    /// Coordinator over `<root>/.warden/`. Nothing is created until the
    /// first mutation.
    pub fn open(root: &Path) -> Self {
        let dir = root.join(STATE_DIR);
        Self {
            state: StateStore::new(dir.join(STATE_FILE)),
            mutex: ProcessMutex::new(dir.join(SENTINEL_FILE)),
        }
    }

    pub fn state_store(&self) -> &StateStore {
        &self.state
    }

    pub fn mutex(&self) -> &ProcessMutex {
        &self.mutex
    }

    /// Attempt to lock every file in `files` for `(agent_id, task_id)`.
    ///
    /// All-or-nothing: a single file held by a different (agent, task) pair
    /// blocks the entire request and leaves the store unchanged.
    /// Re-acquisition of files the pair already holds is a no-op success.
    /// An empty file set trivially succeeds with no state change.
    pub fn acquire(&self, agent_id: &str, task_id: &str, files: &[String]) -> Result<AcquireOutcome> {
        validate_name(agent_id)?;
        validate_name(task_id)?;

        let candidates = normalize_files(files);
        if candidates.is_empty() {
            return Ok(AcquireOutcome::Acquired(Vec::new()));
        }

        let _guard = self.mutex.acquire()?;
        let mut state = self.state.load();

        let hits = conflict::find(&candidates, &state.locks);
        let blockers: Vec<LockRecord> = hits
            .iter()
            .filter(|rec| !rec.owned_by(agent_id, task_id))
            .cloned()
            .collect();
        if !blockers.is_empty() {
            return Ok(AcquireOutcome::Blocked(blockers));
        }

        // Remaining hits are all self-owned; skip them to avoid duplicates.
        let held: BTreeSet<&str> = hits.iter().map(|rec| rec.file.as_str()).collect();
        let now = Utc::now();
        let granted: Vec<LockRecord> = candidates
            .iter()
            .filter(|file| !held.contains(file.as_str()))
            .map(|file| LockRecord {
                file: file.clone(),
                agent_id: agent_id.to_string(),
                task_id: task_id.to_string(),
                locked_at: now,
            })
            .collect();

        if !granted.is_empty() {
            state.locks.extend(granted.iter().cloned());
            self.state.save(&state)?;
        }
        Ok(AcquireOutcome::Acquired(granted))
    }

    /// Remove every lock held by `(agent_id, task_id)`, returning how many
    /// records were removed. Releasing when nothing is held is a no-op.
    pub fn release(&self, agent_id: &str, task_id: &str) -> Result<usize> {
        validate_name(agent_id)?;
        validate_name(task_id)?;

        let _guard = self.mutex.acquire()?;
        let mut state = self.state.load();

        let before = state.locks.len();
        state.locks.retain(|rec| !rec.owned_by(agent_id, task_id));
        let removed = before - state.locks.len();

        if removed > 0 {
            self.state.save(&state)?;
        }
        Ok(removed)
    }

    /// Read-only snapshot of current locks. Not serialized against writers:
    /// may be slightly stale, which is the accepted trade-off for the read
    /// path (serialized-write correctness only, no linearizable reads).
    pub fn active_locks(&self) -> Vec<LockRecord> {
        self.state.load().locks
    }

    /// Preview of the blockers `acquire` would report for this request,
    /// without acquiring. Applies the same self-exclusion as `acquire`.
    pub fn detect_conflicts(
        &self,
        agent_id: &str,
        task_id: &str,
        files: &[String],
    ) -> Result<Vec<LockRecord>> {
        validate_name(agent_id)?;
        validate_name(task_id)?;

        let candidates = normalize_files(files);
        let state = self.state.load();
        Ok(conflict::find(&candidates, &state.locks)
            .into_iter()
            .filter(|rec| !rec.owned_by(agent_id, task_id))
            .collect())
    }
}

/// Normalize and deduplicate a requested file set, dropping paths that
/// normalize to nothing.
fn normalize_files(files: &[String]) -> BTreeSet<String> {
    files
        .iter()
        .map(|f| paths::normalize(f))
        .filter(|f| !f.is_empty())
        .collect()
}

/// Agent and task identifiers: non-empty ASCII alphanumeric plus
/// hyphen/underscore/dot. Keeps identifiers shell- and diagnostic-safe.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(WardenError::InvalidName(name.to_string()));
    }
    Ok(())
}
