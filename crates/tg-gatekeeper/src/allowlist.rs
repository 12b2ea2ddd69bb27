//! Persisted allowlist of user handles
//!
//! In-memory set of `@`-prefixed handles, snapshotted to a JSON file on every
//! mutation. The in-memory state is the source of truth; the file is a
//! best-effort backup reloaded only at startup. There is no revoke operation.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// On-disk snapshot format: `{"allowed": ["@alice", ...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    allowed: Vec<String>,
}

/// Allowlist store. Constructed once at startup and handed to the router;
/// the owner id is fixed for the process lifetime and never stored in the
/// set itself.
#[derive(Debug)]
pub struct Allowlist {
    owner_id: i64,
    handles: HashSet<String>,
    path: PathBuf,
}

impl Allowlist {
    /// Load the union of the environment seed and the snapshot file.
    /// A missing or malformed file is treated as empty, never fatal.
    pub fn load(owner_id: i64, seed: &[String], path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let mut handles: HashSet<String> = seed
            .iter()
            .filter(|h| !h.is_empty())
            .cloned()
            .collect();

        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Snapshot>(&raw) {
                Ok(snapshot) => {
                    handles.extend(snapshot.allowed.into_iter().filter(|h| !h.is_empty()));
                }
                Err(e) => {
                    warn!(path = %path.display(), "ignoring malformed allowlist file: {e}");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %path.display(), "failed to read allowlist file: {e}");
            }
        }

        info!(count = handles.len(), "allowlist loaded");

        Self {
            owner_id,
            handles,
            path,
        }
    }

    /// Snapshot the whole set to disk. Failures are logged and reported as
    /// `false`; they never propagate, so a read-only filesystem costs
    /// durability but not availability.
    pub fn save(&self) -> bool {
        let mut allowed: Vec<String> = self.handles.iter().cloned().collect();
        allowed.sort();

        let result = serde_json::to_string(&Snapshot { allowed })
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&self.path, json).map_err(|e| e.to_string()));

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), "failed to persist allowlist: {e}");
                false
            }
        }
    }

    /// Add a handle and snapshot the set. Adding an already-present handle is
    /// a no-op for the set but still rewrites the file. Returns the persist
    /// outcome.
    pub fn grant(&mut self, handle: &str) -> bool {
        self.handles.insert(handle.to_string());
        self.save()
    }

    /// True iff the handle is non-empty and present in the set, or the
    /// numeric id is the owner's. No other authorization path exists.
    pub fn is_allowed(&self, handle: Option<&str>, user_id: i64) -> bool {
        if user_id == self.owner_id {
            return true;
        }
        handle.is_some_and(|h| !h.is_empty() && self.handles.contains(h))
    }

    /// The always-authorized owner id.
    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.handles.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
