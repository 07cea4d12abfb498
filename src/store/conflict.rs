use std::collections::BTreeSet;

use crate::model::LockRecord;

/// Return the locks whose file matches any candidate path.
///
/// Candidates must already be normalized (see [`crate::paths::normalize`]);
/// stored records are normalized at acquire time, so comparison is plain
/// equality. Agent-agnostic: excluding the requester's own (agent, task)
/// records is the caller's job, applied identically by `acquire` and
/// `detect_conflicts`.
pub fn find(candidates: &BTreeSet<String>, locks: &[LockRecord]) -> Vec<LockRecord> {
    locks
        .iter()
        .filter(|rec| candidates.contains(&rec.file))
        .cloned()
        .collect()
}
