//! Core domain types for the Gymlog workout logger.
//!
//! This module defines the two shapes that travel through the system:
//! - A single logged set (`WorkoutRow`)
//! - A completed, persisted workout (`WorkoutSession`)
//!
//! Serde field names match the persisted/wire JSON layout exactly
//! (`weightLbs`, `dateISO`, `createdAt` as epoch milliseconds), so stored
//! history and parser payloads stay byte-compatible across versions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged set within a workout.
///
/// Weight and reps are kept as free text on purpose: users type things like
/// "4 plates" or "8-10" and the value is displayed verbatim, never computed
/// on. Rows are immutable once appended; only a bulk clear exists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRow {
    pub exercise: String,

    /// 1-based set number, scoped per exercise name within a session.
    pub set: u32,

    #[serde(rename = "weightLbs", default)]
    pub weight_lbs: String,

    #[serde(default)]
    pub reps: String,

    #[serde(default)]
    pub notes: String,
}

/// A completed workout, persisted exactly once at end-of-session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique identifier, generated at session start by the lifecycle
    /// controller (millisecond timestamp plus a random suffix).
    pub id: String,

    /// The logical workout day, captured when the session started.
    /// Distinct from the wall-clock instant the session was saved.
    #[serde(rename = "dateISO")]
    pub date: NaiveDate,

    /// Body-part label shown in history (e.g. "Push" or "Chest + Tris").
    pub part: String,

    /// Sets in insertion order. Append-only while the session is active.
    pub rows: Vec<WorkoutRow>,

    /// Wall-clock instant the session was started (not saved).
    #[serde(rename = "createdAt", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Body-part choices offered when starting a workout.
pub const DEFAULT_BODY_PARTS: &[&str] = &[
    "Push",
    "Pull",
    "Legs",
    "Abs",
    "Chest",
    "Back",
    "Bis",
    "Tris",
    "Shoulders",
    "Cardio",
];

/// Label used when a session was started without any body-part selection.
pub const FALLBACK_PART_LABEL: &str = "Workout";

/// Join selected body-part tags into the display label stored on a session.
///
/// Blank tags are skipped; an empty selection falls back to a generic label.
pub fn join_part_label(parts: &[String]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" + ");

    if joined.is_empty() {
        FALLBACK_PART_LABEL.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_json_field_names() {
        let session = WorkoutSession {
            id: "1700000000000_abc".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
            part: "Legs".into(),
            rows: vec![WorkoutRow {
                exercise: "Squat".into(),
                set: 1,
                weight_lbs: "225".into(),
                reps: "5".into(),
                notes: String::new(),
            }],
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["dateISO"], "2026-08-23");
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["rows"][0]["weightLbs"], "225");
    }

    #[test]
    fn test_row_optional_fields_default_empty() {
        let row: WorkoutRow =
            serde_json::from_str(r#"{"exercise":"Row","set":2}"#).unwrap();
        assert_eq!(row.set, 2);
        assert_eq!(row.weight_lbs, "");
        assert_eq!(row.reps, "");
        assert_eq!(row.notes, "");
    }

    #[test]
    fn test_join_part_label() {
        assert_eq!(join_part_label(&[]), "Workout");
        assert_eq!(join_part_label(&["  ".into()]), "Workout");
        assert_eq!(join_part_label(&["Chest".into()]), "Chest");
        assert_eq!(
            join_part_label(&["Chest".into(), "Tris".into()]),
            "Chest + Tris"
        );
    }
}
