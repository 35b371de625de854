//! `gridline-load`: loads the configured snapshot files into a store.
//!
//! Configuration comes from `GRIDLINE_*` environment variables (see
//! [`gridline_db::config`]). With `GRIDLINE_STORE_PATH` set the run
//! persists into that redb file; otherwise it loads into memory and only
//! reports what it would have written.

use std::process::ExitCode;

use gridline_connectors::{ColumnarDecoder, ColumnarDecoderConfig};
use gridline_db::{DbError, FileStatus, LoadCoordinator, LoaderConfig, Manifest, RunSummary};
use gridline_storage::{DocumentStore, MemoryStore, RedbStore};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(summary) if summary.totals.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "load aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunSummary, DbError> {
    let config = LoaderConfig::from_env()?;
    let manifest = config.manifest()?;
    let decoder = ColumnarDecoder::with_config(
        ColumnarDecoderConfig::default().with_batch_size(config.batch_size),
    );

    let summary = if let Some(path) = &config.store_path {
        info!(path = %path.display(), database = %config.database, "opening redb store");
        let store = RedbStore::create(path, config.database.as_str())?;
        load(&store, decoder, &manifest)
    } else {
        warn!("GRIDLINE_STORE_PATH not set, loading into memory only");
        load(&MemoryStore::new(), decoder, &manifest)
    };
    Ok(summary)
}

fn load(
    store: &dyn DocumentStore,
    decoder: ColumnarDecoder,
    manifest: &Manifest,
) -> RunSummary {
    let summary = LoadCoordinator::with_decoder(store, decoder).run(manifest);

    for outcome in &summary.files {
        match &outcome.status {
            FileStatus::Synced(report) if !report.is_clean() => {
                for failure in &report.failures {
                    warn!(
                        file = %outcome.entry,
                        index = failure.index,
                        key = ?failure.key.as_ref().map(ToString::to_string),
                        error = %failure.message,
                        "record not written"
                    );
                }
            }
            FileStatus::ReadFailed(e) | FileStatus::DecodeFailed(e) => {
                error!(file = %outcome.entry, error = %e, "file not loaded");
            }
            _ => {}
        }
    }
    for (collection, count) in &summary.collection_counts {
        info!(collection = %collection, documents = count, "collection total");
    }
    summary
}
