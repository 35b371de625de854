//! # Gridline DB
//!
//! Loads season-level football statistics from columnar snapshot files
//! into a document store.
//!
//! For each [`ManifestEntry`] the [`LoadCoordinator`] reads one file,
//! decodes it whole with the columnar decoder, and hands the records to
//! the [`SyncEngine`], which upserts them by natural key. Running a load
//! twice leaves the store as running it once.
//!
//! ```rust,ignore
//! use gridline_db::{LoadCoordinator, LoaderConfig};
//! use gridline_storage::MemoryStore;
//!
//! let config = LoaderConfig::default();
//! let store = MemoryStore::new();
//! let summary = LoadCoordinator::new(&store).run(&config.manifest()?);
//! println!("{} records applied", summary.totals.applied);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod sync;

pub use config::LoaderConfig;
pub use error::DbError;
pub use manifest::{Manifest, ManifestEntry};
pub use pipeline::{FileOutcome, FileStatus, LoadCoordinator, RunSummary, RunTotals};
pub use sync::{SyncEngine, SyncFailure, SyncReport};
