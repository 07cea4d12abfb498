use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single advisory claim on one file by one (agent, task) pair.
///
/// No key constraint is enforced here: a file appears in at most one
/// *effective* lock because acquisition is rejected while a conflicting
/// record exists, not because the store deduplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockRecord {
    pub file: String,
    pub agent_id: String,
    pub task_id: String,
    pub locked_at: DateTime<Utc>,
}

impl LockRecord {
    /// Whether this record is held by the given (agent, task) pair.
    pub fn owned_by(&self, agent_id: &str, task_id: &str) -> bool {
        self.agent_id == agent_id && self.task_id == task_id
    }
}

impl std::fmt::Display for LockRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} held by {}/{}",
            self.file, self.agent_id, self.task_id
        )
    }
}

/// An agent's self-declared focus plus a configuration fingerprint,
/// for human cross-checking. Keyed by `agent`; updates replace, no history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentStatus {
    pub agent: String,
    pub focus: String,
    pub context_hash: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Root of the shared coordination document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyncState {
    #[serde(default)]
    pub agents: Vec<AgentStatus>,
    #[serde(default)]
    pub locks: Vec<LockRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_record_round_trips_json() {
        let rec = LockRecord {
            file: "src/app.py".into(),
            agent_id: "codex".into(),
            task_id: "T-1".into(),
            locked_at: Utc::now(),
        };
        let json = serde_json::to_string(&rec).unwrap();
        let parsed: LockRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(rec, parsed);
    }

    #[test]
    fn agent_status_omits_empty_notes() {
        let status = AgentStatus {
            agent: "codex".into(),
            focus: "auth refactor".into(),
            context_hash: "abc123".into(),
            updated_at: Utc::now(),
            notes: None,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("notes"));
        let parsed: AgentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, parsed);
    }

    #[test]
    fn sync_state_defaults_missing_fields() {
        let state: SyncState = serde_json::from_str("{}").unwrap();
        assert!(state.agents.is_empty());
        assert!(state.locks.is_empty());

        let state: SyncState = serde_json::from_str(r#"{"locks": []}"#).unwrap();
        assert!(state.agents.is_empty());
    }

    #[test]
    fn owned_by_requires_both_ids() {
        let rec = LockRecord {
            file: "a".into(),
            agent_id: "codex".into(),
            task_id: "T-1".into(),
            locked_at: Utc::now(),
        };
        assert!(rec.owned_by("codex", "T-1"));
        assert!(!rec.owned_by("codex", "T-2"));
        assert!(!rec.owned_by("claude", "T-1"));
    }
}
