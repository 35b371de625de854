//! Persistent document store backed by redb.
//!
//! Each collection is a redb table named `{database}.{collection}`, so
//! several logical databases can share one file. Keys are encoded natural
//! keys; values are the JSON bytes of the full document.

use std::path::Path;

use gridline_core::{Document, EntityDescriptor, NaturalKey};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use tracing::debug;

use crate::error::StoreError;
use crate::filter::DocumentFilter;
use crate::store::{DocumentStore, UpsertOutcome};

type DocumentTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

/// A redb file holding the collections of one logical database.
pub struct RedbStore {
    db: Database,
    database: String,
}

impl RedbStore {
    /// Opens the redb file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be opened or created.
    pub fn create(path: impl AsRef<Path>, database: impl Into<String>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref())?;
        Ok(Self {
            db,
            database: database.into(),
        })
    }

    /// Returns the logical database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    fn table_name(&self, collection: &str) -> String {
        format!("{}.{collection}", self.database)
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl DocumentStore for RedbStore {
    fn ensure_collection(&self, descriptor: &EntityDescriptor) -> Result<(), StoreError> {
        let name = self.table_name(descriptor.collection);
        let table_def: DocumentTable<'_> = TableDefinition::new(&name);
        let txn = self.db.begin_write()?;
        let _ = txn.open_table(table_def)?;
        txn.commit()?;
        debug!(table = %name, "collection ready");
        Ok(())
    }

    fn upsert(
        &self,
        collection: &str,
        key: &NaturalKey,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let name = self.table_name(collection);
        let table_def: DocumentTable<'_> = TableDefinition::new(&name);
        let value = serde_json::to_vec(&document)?;
        let encoded = key.encode();

        let txn = self.db.begin_write()?;
        let replaced = {
            let mut table = txn.open_table(table_def)?;
            let previous = table.insert(encoded.as_slice(), value.as_slice())?;
            previous.is_some()
        };
        txn.commit()?;

        Ok(if replaced {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Inserted
        })
    }

    fn get(&self, collection: &str, key: &NaturalKey) -> Result<Option<Document>, StoreError> {
        let name = self.table_name(collection);
        let table_def: DocumentTable<'_> = TableDefinition::new(&name);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(table_def) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let encoded = key.encode();
        let document = match table.get(encoded.as_slice())? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(document)
    }

    fn count(&self, collection: &str, filter: &DocumentFilter) -> Result<u64, StoreError> {
        let name = self.table_name(collection);
        let table_def: DocumentTable<'_> = TableDefinition::new(&name);
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(table_def) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut n = 0u64;
        for entry in table.iter()? {
            let (_, value) = entry?;
            if filter.is_empty() {
                n += 1;
                continue;
            }
            let document: Document = serde_json::from_slice(value.value())?;
            if filter.matches(&document) {
                n += 1;
            }
        }
        Ok(n)
    }

    fn store_name(&self) -> &str {
        "redb"
    }
}
