//! Manifest-driven load pipeline.
//!
//! ```text
//!  Manifest ──► for each entry ──► read file ──► decode ──► SyncEngine ──► store
//!                    │                 │            │
//!                    │              Missing    DecodeFailed
//!                    ▼
//!               RunSummary (per-file status, totals, collection counts)
//! ```
//!
//! Entries run one at a time, in manifest order. A file that cannot be
//! read or decoded is reported and the run moves on to the next entry.

pub mod coordinator;
pub mod metrics;

pub use coordinator::{FileOutcome, FileStatus, LoadCoordinator, RunSummary};
pub use metrics::RunTotals;
