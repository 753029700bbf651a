//! In-memory lifecycle of the one active logging session.
//!
//! The controller is a small state machine: idle (no session) or active
//! (id/date/start-time fixed, rows mutable). A session reaches the workout
//! store exactly once, at end-of-workout with at least one row. If the
//! calendar day changes before the user ends the workout, the session is
//! discarded without persisting — that silent abandonment is part of the
//! daily-rollover contract, not an accident.
//!
//! Callers pass the current time into every transition, which keeps the
//! controller deterministic under test.

use crate::kv::KeyValueStore;
use crate::store::WorkoutStore;
use crate::types::join_part_label;
use crate::{Error, Result, WorkoutRow, WorkoutSession};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Working state of an in-progress workout.
#[derive(Clone, Debug)]
pub struct ActiveSession {
    pub id: String,
    pub date: NaiveDate,
    pub parts: Vec<String>,
    pub rows: Vec<WorkoutRow>,
    pub created_at: DateTime<Utc>,
}

/// State machine owning the currently-active workout, if any.
#[derive(Default)]
pub struct SessionController {
    active: Option<ActiveSession>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, or `None` when idle.
    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// Begin a new session. Rejected while another session is active.
    ///
    /// Captures the session id, the logical workout date (local calendar
    /// day) and the start instant; both stay fixed until the session ends
    /// or rolls over.
    pub fn start_workout(
        &mut self,
        parts: Vec<String>,
        now: DateTime<Local>,
    ) -> Result<&ActiveSession> {
        if self.active.is_some() {
            return Err(Error::WorkoutAlreadyActive);
        }

        let session = ActiveSession {
            id: new_session_id(now),
            date: now.date_naive(),
            parts,
            rows: Vec::new(),
            created_at: now.with_timezone(&Utc),
        };
        tracing::info!("Started workout {} for {}", session.id, session.date);

        Ok(self.active.insert(session))
    }

    /// Append already-numbered rows (typically from the parser backend) in
    /// arrival order. Rejected while idle.
    pub fn append_rows(&mut self, rows: Vec<WorkoutRow>) -> Result<usize> {
        let session = self.active.as_mut().ok_or(Error::NoActiveWorkout)?;
        let added = rows.len();
        session.rows.extend(rows);
        Ok(added)
    }

    /// Manually log one set. The set number is assigned from the current
    /// in-memory rows; a blank exercise name is rejected.
    pub fn add_set(
        &mut self,
        exercise: &str,
        weight_lbs: &str,
        reps: &str,
        notes: &str,
    ) -> Result<&WorkoutRow> {
        let exercise = exercise.trim();
        if exercise.is_empty() {
            return Err(Error::Other("Exercise name is required.".into()));
        }

        let set = self.next_set_number(exercise)?;
        let session = self.active.as_mut().ok_or(Error::NoActiveWorkout)?;
        session.rows.push(WorkoutRow {
            exercise: exercise.to_string(),
            set,
            weight_lbs: weight_lbs.trim().to_string(),
            reps: reps.trim().to_string(),
            notes: notes.trim().to_string(),
        });

        Ok(session.rows.last().expect("row just pushed"))
    }

    /// Next set number for an exercise: 1 + count of current rows whose
    /// name matches after trimming and lowercasing. Purely a function of
    /// the in-memory rows, never recomputed retroactively.
    pub fn next_set_number(&self, exercise: &str) -> Result<u32> {
        let session = self.active.as_ref().ok_or(Error::NoActiveWorkout)?;
        let needle = exercise.trim().to_lowercase();
        let count = session
            .rows
            .iter()
            .filter(|r| r.exercise.trim().to_lowercase() == needle)
            .count();
        Ok(count as u32 + 1)
    }

    /// Drop all rows logged so far, keeping the session active.
    pub fn clear_rows(&mut self) {
        if let Some(session) = self.active.as_mut() {
            session.rows.clear();
        }
    }

    /// Finish the active session: snapshot it, persist it, return to idle.
    ///
    /// Rejected while idle or when no rows were logged. The persisted date
    /// and start time are the ones captured at start, not at end.
    pub fn end_workout<S: KeyValueStore>(
        &mut self,
        store: &mut WorkoutStore<S>,
    ) -> Result<WorkoutSession> {
        let session = match self.active.as_ref() {
            None => return Err(Error::NoActiveWorkout),
            Some(active) if active.rows.is_empty() => return Err(Error::EmptyWorkout),
            Some(active) => WorkoutSession {
                id: active.id.clone(),
                date: active.date,
                part: join_part_label(&active.parts),
                rows: active.rows.clone(),
                created_at: active.created_at,
            },
        };

        // Working state is only dropped once the save has landed; on a
        // failed write the session stays active and /end can be retried.
        store.save(session.clone())?;
        self.active = None;
        Ok(session)
    }

    /// Reset to idle if the calendar day has moved past the session's date.
    ///
    /// Discards the active session without persisting it. Idempotent; meant
    /// to be called from a recurring foreground poll and on every return to
    /// the foreground. Returns whether a reset happened.
    pub fn check_day_rollover(&mut self, today: NaiveDate) -> bool {
        match self.active.as_ref() {
            Some(session) if session.date != today => {
                tracing::info!(
                    "Day rolled over ({} -> {}); discarding unsaved workout {}",
                    session.date,
                    today,
                    session.id
                );
                self.active = None;
                true
            }
            _ => false,
        }
    }
}

/// Session id: millisecond timestamp plus a random suffix. The controller
/// is the sole generator, and the random component rules out collisions
/// between sessions started within the same millisecond.
fn new_session_id(now: DateTime<Local>) -> String {
    format!(
        "{}_{}",
        now.timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}
