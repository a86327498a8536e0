//! In-memory implementation of `RoleSink`.
//!
//! Keeps every written document behind a `Mutex` so a clone handed to the
//! generator and the clone kept by the caller observe the same writes. Used
//! for dry runs and tests.

use std::sync::{Arc, Mutex};

use rolegen_contracts::error::{RolegenError, RolegenResult};
use rolegen_core::traits::{RoleDocument, RoleSink};

#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleSink {
    writes: Arc<Mutex<Vec<(RoleDocument, String)>>>,
}

impl InMemoryRoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent contents written for `document`, if any.
    pub fn get(&self, document: RoleDocument) -> Option<String> {
        let writes = self.writes.lock().ok()?;
        writes
            .iter()
            .rev()
            .find(|(d, _)| *d == document)
            .map(|(_, contents)| contents.clone())
    }

    /// Documents in the order they were written.
    pub fn documents(&self) -> Vec<RoleDocument> {
        self.writes
            .lock()
            .map(|writes| writes.iter().map(|(d, _)| *d).collect())
            .unwrap_or_default()
    }
}

impl RoleSink for InMemoryRoleSink {
    fn write(&self, document: RoleDocument, contents: &str) -> RolegenResult<()> {
        let mut writes = self.writes.lock().map_err(|e| RolegenError::OutputError {
            path: format!("<memory:{document}>"),
            reason: format!("sink lock poisoned: {}", e),
        })?;
        writes.push((document, contents.to_string()));
        Ok(())
    }
}
