//! Advisory file-lock coordination for concurrent agents sharing a
//! working tree.
//!
//! Multiple independent agent processes (human or automated) declare which
//! files they are editing; acquisition is rejected while a different
//! (agent, task) pair holds any requested file. The shared state lives in a
//! single JSON document guarded by an OS-level advisory lock, so every
//! read-modify-write is serialized across processes. Locks are cooperative:
//! they prevent conflicts only among participants that check them.

pub mod agent;
pub mod error;
pub mod model;
pub mod output;
pub mod paths;
pub mod store;
