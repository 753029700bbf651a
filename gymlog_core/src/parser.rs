//! Client for the remote free-text parsing backend.
//!
//! The backend turns one natural-language message ("leg press 4 plates 10
//! reps") into zero or more structured rows. The current session's rows are
//! sent along as context so the remote side can keep per-exercise set
//! numbering consistent.
//!
//! The call is a plain blocking POST; there is no retry, no imposed timeout
//! and no cancellation. A failed or empty result is reported once and the
//! user's input stays available for a manual retry.

use crate::{Error, Result, WorkoutRow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default backend address for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    message: &'a str,
    rows: &'a [WorkoutRow],
}

/// Response rows as the backend sends them, before sanitization. Fields are
/// kept loose on purpose: the model behind the endpoint occasionally emits
/// numbers where strings belong, or drops a field entirely.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    exercise: Value,
    #[serde(default)]
    set: Value,
    #[serde(rename = "weightLbs", default)]
    weight_lbs: Value,
    #[serde(default)]
    reps: Value,
    #[serde(default)]
    notes: Value,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    rows: Vec<RawRow>,
}

/// HTTP client for the parser backend.
pub struct ParserClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ParserClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Parse a free-text message into structured rows.
    ///
    /// `context` is the current session's row table. Returns the sanitized
    /// new rows; an empty vec means the backend found nothing to log.
    pub fn parse(&self, message: &str, context: &[WorkoutRow]) -> Result<Vec<WorkoutRow>> {
        let url = format!("{}/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ParseRequest {
                message,
                rows: context,
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Parser backend answered HTTP {} for {}", status, url);
            return Err(Error::Api(format!("HTTP {}", status.as_u16())));
        }

        let parsed: ParseResponse = response.json()?;
        let rows = sanitize_rows(parsed.rows);
        tracing::debug!("Parser returned {} usable rows", rows.len());
        Ok(rows)
    }

    /// Cheap reachability probe against the backend's health endpoint.
    pub fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let status = self.client.get(&url).send()?.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Api(format!("HTTP {}", status.as_u16())))
        }
    }
}

/// Drop rows with a blank exercise name, default unusable set numbers to 1,
/// and coerce the free-text fields to trimmed strings.
fn sanitize_rows(raw: Vec<RawRow>) -> Vec<WorkoutRow> {
    raw.into_iter()
        .filter_map(|row| {
            let exercise = coerce_text(&row.exercise);
            if exercise.is_empty() {
                return None;
            }
            Some(WorkoutRow {
                exercise,
                set: coerce_set(&row.set),
                weight_lbs: coerce_text(&row.weight_lbs),
                reps: coerce_text(&row.reps),
                notes: coerce_text(&row.notes),
            })
        })
        .collect()
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn coerce_set(value: &Value) -> u32 {
    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 1.0 => n as u32,
        _ => 1,
    }
}
