//! Append-only validation-record store.
//!
//! The engine only needs two operations: append a result and query a time
//! window. Backends are an implementation detail; the in-memory store here
//! serves tests and single-process hosts. Results are never updated in
//! place, so concurrent append and read need no more than a read-mostly
//! lock with snapshot-on-read.

use crate::types::{TimeRange, ValidationResult};
use parking_lot::RwLock;

/// Store failures.
///
/// Propagated, never swallowed: a store outage must not read as "no data".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("validation store I/O failed: {0}")]
    Io(String),

    /// A stored record could not be decoded
    #[error("stored validation record is corrupt: {0}")]
    Corrupt(String),

    /// Backend-specific failure
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Append/query contract for validation records.
pub trait ValidationStore: Send + Sync {
    /// Append one result. Never overwrites prior results.
    ///
    /// # Errors
    /// - `StoreError` if the backend write fails
    fn append(&self, result: &ValidationResult) -> Result<(), StoreError>;

    /// All results whose `validated_at` falls inside the window.
    ///
    /// # Errors
    /// - `StoreError` if the backend read fails
    fn query(&self, window: &TimeRange) -> Result<Vec<ValidationResult>, StoreError>;
}

/// In-memory append-only store.
#[derive(Debug, Default)]
pub struct MemoryValidationStore {
    records: RwLock<Vec<ValidationResult>>,
}

impl MemoryValidationStore {
    /// Create an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ValidationStore for MemoryValidationStore {
    fn append(&self, result: &ValidationResult) -> Result<(), StoreError> {
        self.records.write().push(result.clone());
        Ok(())
    }

    fn query(&self, window: &TimeRange) -> Result<Vec<ValidationResult>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| window.contains(r.validated_at))
            .cloned()
            .collect())
    }
}
