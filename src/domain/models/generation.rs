#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

use super::Command;
use super::PromptTab;

pub const GENERATE_FALLBACK_ERROR: &str = "Failed to generate prompt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Session local sequence number, used to drop responses for requests that
    /// are no longer pending. Never sent to the service.
    pub id: u64,
    pub command: Command,
}

impl GenerationRequest {
    pub fn new(id: u64, command: Command) -> GenerationRequest {
        return GenerationRequest { id, command };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub command: String,
    pub structured_prompt: String,
    pub system_prompt: String,
    pub created_at: String,
}

impl GenerationResult {
    pub fn prompt(&self, tab: PromptTab) -> &str {
        match tab {
            PromptTab::Structured => return &self.structured_prompt,
            PromptTab::System => return &self.system_prompt,
        }
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        return parse_timestamp(&self.created_at);
    }

    /// Local time for display. Timestamps the client can't make sense of are
    /// shown as the service sent them.
    pub fn created_at_display(&self) -> String {
        if let Some(created_at) = self.created_at_utc() {
            return created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
        }

        return self.created_at.to_string();
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    // Python's isoformat() without an offset.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    if let Ok(secs) = raw.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }

    if let Ok(secs) = raw.parse::<f64>() {
        if secs.is_finite() {
            return Utc.timestamp_millis_opt((secs * 1000.0) as i64).single();
        }
    }

    return None;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The service answered with a non-2xx status.
    #[error("{0}")]
    Service(String),
    /// The service couldn't be reached, or answered with something that isn't
    /// a generation.
    #[error("{0}")]
    Transport(String),
}

impl GenerationError {
    pub fn service(detail: Option<String>, fallback: &str) -> GenerationError {
        return GenerationError::Service(non_empty_or(detail, fallback));
    }

    pub fn transport(message: String, fallback: &str) -> GenerationError {
        return GenerationError::Transport(non_empty_or(Some(message), fallback));
    }
}

fn non_empty_or(message: Option<String>, fallback: &str) -> String {
    if let Some(msg) = message {
        if !msg.trim().is_empty() {
            return msg;
        }
    }

    return fallback.to_string();
}
