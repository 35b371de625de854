//! In-process document store.

use std::collections::{BTreeMap, HashMap};

use gridline_core::{Document, NaturalKey};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::filter::DocumentFilter;
use crate::store::{DocumentStore, UpsertOutcome};

type Collection = BTreeMap<Vec<u8>, Document>;

/// Collections held in memory, each ordered by encoded natural key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every document in `collection`, in key order.
    #[must_use]
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl DocumentStore for MemoryStore {
    fn upsert(
        &self,
        collection: &str,
        key: &NaturalKey,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut collections = self.collections.write();
        let previous = collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.encode(), document);
        Ok(match previous {
            Some(_) => UpsertOutcome::Replaced,
            None => UpsertOutcome::Inserted,
        })
    }

    fn get(&self, collection: &str, key: &NaturalKey) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|c| c.get(&key.encode()).cloned()))
    }

    fn count(&self, collection: &str, filter: &DocumentFilter) -> Result<u64, StoreError> {
        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(0);
        };
        let n = if filter.is_empty() {
            docs.len()
        } else {
            docs.values().filter(|d| filter.matches(d)).count()
        };
        Ok(n as u64)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
