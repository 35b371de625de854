//! # Gridline Core
//!
//! Domain records and reconciliation keys shared by the decoder, the
//! document stores and the synchronization engine.
//!
//! - [`records`] — the four season-level record schemas
//! - [`entity`] — entity-kind descriptors (`{key fields, collection}`)
//! - [`key`] — natural keys and their memcomparable byte encoding

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod entity;
pub mod key;
pub mod records;

pub use entity::{Document, EntityDescriptor, EntityKind, KeyField, KeyKind};
pub use key::{KeyValue, NaturalKey};
pub use records::{Game, Record, RosterEntry, SeasonalStat, StatLine, WeeklyStat, REGPOST};
