//! Durable workout history on top of the key-value primitive.
//!
//! The whole history lives as one JSON array under a single key, newest
//! session first. Every mutation is a full read-modify-write of that array;
//! a single user's history is small enough that O(n) per call is fine, and
//! re-reading on every operation means external changes are always observed.

use crate::kv::KeyValueStore;
use crate::{Result, WorkoutSession};

/// Storage key for the serialized history array.
pub const HISTORY_KEY: &str = "workout_history_v1";

/// Append-only list of completed workouts under one logical key.
pub struct WorkoutStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// All persisted sessions, newest first.
    ///
    /// An absent key is an empty history. So is a value that fails to parse
    /// or parses to something other than an array: corruption is treated as
    /// "no history", never a fatal error.
    pub fn list(&self) -> Result<Vec<WorkoutSession>> {
        let Some(raw) = self.kv.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<WorkoutSession>>(&raw) {
            Ok(sessions) => Ok(sessions),
            Err(e) => {
                tracing::warn!(
                    "Stored history is not a valid session list ({}). Treating as empty.",
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Persist a completed session at the front of the history.
    pub fn save(&mut self, session: WorkoutSession) -> Result<()> {
        let mut sessions = self.list()?;
        let id = session.id.clone();
        sessions.insert(0, session);
        self.write_back(&sessions)?;
        tracing::info!("Saved workout {} ({} total)", id, sessions.len());
        Ok(())
    }

    /// Remove the session with the given id. No-op if it does not exist.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut sessions = self.list()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            tracing::debug!("Delete of unknown workout {} ignored", id);
        }
        self.write_back(&sessions)
    }

    /// Drop the entire history.
    pub fn clear(&mut self) -> Result<()> {
        self.kv.remove(HISTORY_KEY)
    }

    /// Look up one session by id.
    pub fn find(&self, id: &str) -> Result<Option<WorkoutSession>> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    fn write_back(&mut self, sessions: &[WorkoutSession]) -> Result<()> {
        let raw = serde_json::to_string(sessions)?;
        self.kv.set(HISTORY_KEY, &raw)
    }
}
