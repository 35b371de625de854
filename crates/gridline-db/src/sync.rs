//! Synchronization engine: reconciles decoded records into a collection.
//!
//! One engine serves all four entity kinds. The [`EntityDescriptor`]
//! supplies the target collection and the natural-key fields; the engine
//! extracts each record's key, skips records without one, and upserts the
//! rest in input order. A failed upsert is recorded and the batch goes on.
//!
//! Running the engine twice over the same records leaves the collection
//! as running it once: every write is a full replace keyed by natural key.

use gridline_core::{Document, EntityDescriptor, NaturalKey, Record};
use gridline_storage::{DocumentStore, UpsertOutcome};
use tracing::{debug, info, warn};

/// A record that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Position of the record in the input sequence.
    pub index: usize,
    /// Natural key, when it could be extracted.
    pub key: Option<NaturalKey>,
    /// Error description.
    pub message: String,
}

/// Outcome counts for one synchronized sequence.
///
/// `attempted == applied + skipped + failed` and
/// `applied == inserted + replaced`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Target collection.
    pub collection: String,
    /// Records seen.
    pub attempted: usize,
    /// Records written (inserted or replaced).
    pub applied: usize,
    /// Records written under a key not yet in the collection.
    pub inserted: usize,
    /// Records that replaced an existing document.
    pub replaced: usize,
    /// Records without a complete natural key.
    pub skipped: usize,
    /// Records whose write failed.
    pub failed: usize,
    /// One entry per failed record, in input order.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// An empty report for `collection`.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// True when no record failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record_failure(&mut self, index: usize, key: Option<NaturalKey>, message: String) {
        self.failed += 1;
        self.failures.push(SyncFailure {
            index,
            key,
            message,
        });
    }
}

/// Upserts records into a [`DocumentStore`] by natural key.
pub struct SyncEngine<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> SyncEngine<'a, S> {
    /// Creates an engine writing to `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Synchronizes typed records into their kind's collection.
    ///
    /// A record that fails to serialize counts as failed.
    pub fn sync<R: Record>(&self, records: &[R]) -> SyncReport {
        let descriptor = R::descriptor();
        let mut report = SyncReport::new(descriptor.collection);
        for (index, record) in records.iter().enumerate() {
            match record.to_document() {
                Ok(document) => self.apply(descriptor, &mut report, index, document),
                Err(e) => {
                    report.attempted += 1;
                    warn!(
                        collection = descriptor.collection,
                        index,
                        error = %e,
                        "record serialization failed"
                    );
                    report.record_failure(index, None, e.to_string());
                }
            }
        }
        log_summary(self.store, &report);
        report
    }

    /// Synchronizes prepared documents into `descriptor`'s collection.
    pub fn sync_documents<I>(&self, descriptor: &EntityDescriptor, documents: I) -> SyncReport
    where
        I: IntoIterator<Item = Document>,
    {
        let mut report = SyncReport::new(descriptor.collection);
        for (index, document) in documents.into_iter().enumerate() {
            self.apply(descriptor, &mut report, index, document);
        }
        log_summary(self.store, &report);
        report
    }

    fn apply(
        &self,
        descriptor: &EntityDescriptor,
        report: &mut SyncReport,
        index: usize,
        document: Document,
    ) {
        report.attempted += 1;

        let Some(key) = descriptor.extract_key(&document) else {
            debug!(collection = descriptor.collection, index, "skipping record without natural key");
            report.skipped += 1;
            return;
        };

        match self.store.upsert(descriptor.collection, &key, document) {
            Ok(outcome) => {
                report.applied += 1;
                match outcome {
                    UpsertOutcome::Inserted => report.inserted += 1,
                    UpsertOutcome::Replaced => report.replaced += 1,
                }
            }
            Err(e) => {
                warn!(
                    collection = descriptor.collection,
                    key = %key,
                    index,
                    error = %e,
                    "upsert failed"
                );
                report.record_failure(index, Some(key), e.to_string());
            }
        }
    }
}

fn log_summary<S: DocumentStore + ?Sized>(store: &S, report: &SyncReport) {
    info!(
        store = store.store_name(),
        collection = %report.collection,
        applied = report.applied,
        inserted = report.inserted,
        replaced = report.replaced,
        skipped = report.skipped,
        failed = report.failed,
        "sync complete"
    );
}
