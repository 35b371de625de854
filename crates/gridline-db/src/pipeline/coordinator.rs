//! Runs a manifest: decode each file, synchronize its records.

use std::collections::BTreeMap;
use std::fs;

use gridline_connectors::{ColumnarDecoder, FromRow};
use gridline_core::{EntityKind, Game, RosterEntry, SeasonalStat, WeeklyStat};
use gridline_storage::{DocumentFilter, DocumentStore};
use tracing::{info, warn};

use super::metrics::RunTotals;
use crate::error::DbError;
use crate::manifest::{Manifest, ManifestEntry};
use crate::sync::{SyncEngine, SyncReport};

/// What happened to one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Decoded and synchronized; a file with no rows yields an empty report.
    Synced(SyncReport),
    /// File not present; skipped.
    Missing,
    /// File present but unreadable.
    ReadFailed(String),
    /// File read but not decodable; nothing from it was written.
    DecodeFailed(String),
}

/// One entry and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// The manifest entry.
    pub entry: ManifestEntry,
    /// Its status.
    pub status: FileStatus,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-entry outcomes, in manifest order.
    pub files: Vec<FileOutcome>,
    /// Aggregate counters.
    pub totals: RunTotals,
    /// Documents per touched collection after the run. A collection whose
    /// count query failed is absent.
    pub collection_counts: BTreeMap<String, u64>,
}

/// Drives a [`Manifest`] through the decoder and the [`SyncEngine`].
pub struct LoadCoordinator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    decoder: ColumnarDecoder,
}

impl<'a, S: DocumentStore + ?Sized> LoadCoordinator<'a, S> {
    /// Creates a coordinator with the default decoder.
    pub fn new(store: &'a S) -> Self {
        Self::with_decoder(store, ColumnarDecoder::new())
    }

    /// Creates a coordinator with a configured decoder.
    pub fn with_decoder(store: &'a S, decoder: ColumnarDecoder) -> Self {
        Self { store, decoder }
    }

    /// Loads every entry in order. Never aborts: each entry's failure is
    /// confined to its own [`FileOutcome`].
    pub fn run(&self, manifest: &Manifest) -> RunSummary {
        info!(
            store = self.store.store_name(),
            files = manifest.len(),
            "load started"
        );

        for kind in manifest.kinds() {
            if let Err(e) = self.store.ensure_collection(kind.descriptor()) {
                warn!(collection = kind.descriptor().collection, error = %e, "collection bootstrap failed");
            }
        }

        let mut summary = RunSummary::default();
        for entry in manifest.entries() {
            let status = self.load_status(entry);
            summary.totals.record(&status);
            summary.files.push(FileOutcome {
                entry: entry.clone(),
                status,
            });
        }

        for kind in manifest.kinds() {
            let collection = kind.descriptor().collection;
            match self.store.count(collection, &DocumentFilter::all()) {
                Ok(n) => {
                    summary.collection_counts.insert(collection.to_string(), n);
                }
                Err(e) => warn!(collection, error = %e, "count failed"),
            }
        }

        let totals = &summary.totals;
        info!(
            files_synced = totals.files_synced,
            files_missing = totals.files_missing,
            files_errored = totals.files_errored,
            applied = totals.applied,
            skipped = totals.skipped,
            failed = totals.failed,
            "load finished"
        );
        summary
    }

    /// Reads, decodes and synchronizes one entry.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Io` if the file cannot be read and
    /// `DbError::Decode` if it cannot be decoded. Per-record store
    /// failures are reported in the [`SyncReport`], not as errors.
    pub fn load_file(&self, entry: &ManifestEntry) -> Result<SyncReport, DbError> {
        let bytes = fs::read(&entry.path)?;
        match entry.kind {
            EntityKind::Roster => self.decode_and_sync::<RosterEntry>(entry, bytes),
            EntityKind::Game => self.decode_and_sync::<Game>(entry, bytes),
            EntityKind::SeasonalStat => self.decode_and_sync::<SeasonalStat>(entry, bytes),
            EntityKind::WeeklyStat => self.decode_and_sync::<WeeklyStat>(entry, bytes),
        }
    }

    fn decode_and_sync<R: FromRow>(
        &self,
        entry: &ManifestEntry,
        bytes: Vec<u8>,
    ) -> Result<SyncReport, DbError> {
        let records = self.decoder.decode::<R>(bytes, &entry.context())?;
        if records.is_empty() {
            warn!(file = %entry, "no records decoded");
            return Ok(SyncReport::new(R::descriptor().collection));
        }
        info!(file = %entry, records = records.len(), "decoded");
        Ok(SyncEngine::new(self.store).sync(&records))
    }

    fn load_status(&self, entry: &ManifestEntry) -> FileStatus {
        match self.load_file(entry) {
            Ok(report) => FileStatus::Synced(report),
            Err(e) if e.is_not_found() => {
                warn!(file = %entry, "file not found, skipping");
                FileStatus::Missing
            }
            Err(DbError::Decode(e)) => {
                warn!(file = %entry, error = %e, "decode failed, skipping");
                FileStatus::DecodeFailed(e.to_string())
            }
            Err(e) => {
                warn!(file = %entry, error = %e, "read failed, skipping");
                FileStatus::ReadFailed(e.to_string())
            }
        }
    }
}
