use super::Navigator;
use crate::error::Result;
use parking_lot::RwLock;
use tracing::info;

/// Keeps every navigation target in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: RwLock<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.read().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited.read().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) -> Result<()> {
        self.visited.write().push(target.to_string());
        Ok(())
    }
}

/// Hosts without a browser hand the target to the log instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, target: &str) -> Result<()> {
        info!(target = %target, "navigation requested");
        Ok(())
    }
}
