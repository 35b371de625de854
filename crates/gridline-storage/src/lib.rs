//! # Gridline Storage
//!
//! The document store the synchronization engine writes into.
//!
//! A store holds named collections of JSON documents addressed by the
//! encoded natural key of the entity they describe. The only write is an
//! idempotent upsert that replaces the whole document on a key match.
//!
//! - [`MemoryStore`] keeps collections in process memory
//! - [`RedbStore`] persists each collection as a redb table

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod filter;
pub mod memory;
pub mod redb_store;
pub mod store;

pub use error::StoreError;
pub use filter::DocumentFilter;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use store::{DocumentStore, UpsertOutcome};
