//! Draft persistence for in-progress form values
//!
//! The draft mirrors the live form: the whole form is written on every input
//! event, last write wins, and nothing is reconciled. Every operation returns a
//! `Result`, but callers treat drafts as a best-effort cache and discard the
//! error after logging it, so a broken storage never blocks the form.

use crate::config::FormConfig;
use crate::error::{LeadError, Result};
use crate::host::DraftStorage;
use crate::models::{Field, FormValues};
use serde_json::Value;
use tracing::debug;

pub struct DraftStore<S: DraftStorage> {
    storage: S,
    key: String,
}

impl<S: DraftStorage> DraftStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes a full snapshot of the form, consent included.
    pub fn save(&self, values: &FormValues) -> Result<()> {
        let raw = serde_json::to_string(values)?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, bytes = raw.len(), "draft saved");
        Ok(())
    }

    /// Restores a stored draft into `values`. Returns `Ok(false)` when there is
    /// nothing to restore. On error `values` is left untouched.
    pub fn load(&self, values: &mut FormValues, form: &FormConfig) -> Result<bool> {
        let raw = match self.storage.get_item(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(false),
        };

        let data: Value = serde_json::from_str(&raw)?;
        let entries = data
            .as_object()
            .ok_or_else(|| LeadError::MalformedDraft("draft is not a JSON object".to_string()))?;

        let mut restored = values.clone();
        for (key, value) in entries {
            match key.parse::<Field>() {
                Ok(field) => restored.restore(field, value, form),
                Err(_) => debug!(key = %key, "ignoring unknown draft field"),
            }
        }

        *values = restored;
        debug!(key = %self.key, fields = entries.len(), "draft restored");
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        debug!(key = %self.key, "draft cleared");
        Ok(())
    }

    /// The stored draft exactly as persisted.
    pub fn raw(&self) -> Result<Option<String>> {
        self.storage.get_item(&self.key)
    }

    pub fn exists(&self) -> bool {
        matches!(self.storage.get_item(&self.key), Ok(Some(_)))
    }
}
