//! The body delivered to the webhook

use super::form::FormValues;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Built fresh for every submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub values: FormValues,
    pub timestamp: String,
    pub page: String,
}

impl SubmissionPayload {
    pub fn new(values: FormValues, page: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            values,
            timestamp: format_timestamp(captured_at),
            page: page.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
