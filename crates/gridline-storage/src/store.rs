//! The document store contract.

use gridline_core::{Document, EntityDescriptor, NaturalKey};

use crate::error::StoreError;
use crate::filter::DocumentFilter;

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No document had the key; a new one was stored.
    Inserted,
    /// A document with the key existed and was replaced wholesale.
    Replaced,
}

/// A store of JSON documents grouped into named collections.
///
/// Implementations must make each upsert atomic per key. Callers perform
/// no locking of their own.
pub trait DocumentStore: Send + Sync {
    /// Prepares a collection for writes.
    ///
    /// Stores that create collections lazily need not override this.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be created.
    fn ensure_collection(&self, _descriptor: &EntityDescriptor) -> Result<(), StoreError> {
        Ok(())
    }

    /// Inserts `document` under `key`, or replaces the whole document
    /// already stored under it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write does not complete; the prior
    /// document, if any, is then left unchanged.
    fn upsert(
        &self,
        collection: &str,
        key: &NaturalKey,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Fetches the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    fn get(&self, collection: &str, key: &NaturalKey) -> Result<Option<Document>, StoreError>;

    /// Counts documents in `collection` matching `filter`.
    ///
    /// A collection that was never written counts as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    fn count(&self, collection: &str, filter: &DocumentFilter) -> Result<u64, StoreError>;

    /// Short name for logs.
    fn store_name(&self) -> &str;
}
