//! # Gridline Connectors
//!
//! Decodes columnar snapshot files into typed gridline records.
//!
//! The decoder is whole-file and all-or-nothing: it validates the file
//! envelope and column directory up front, reads only the columns the
//! requested record schema needs, and either returns every record or a
//! [`DecodeError`].

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod columnar;
pub mod error;

pub use columnar::{
    decode_roster, decode_schedules, decode_seasonal_stats, decode_weekly_stats, ColumnSpec,
    ColumnType, ColumnarDecoder, ColumnarDecoderConfig, DecodeContext, FromRow, Row,
};
pub use error::{DecodeError, DecodeResult};
