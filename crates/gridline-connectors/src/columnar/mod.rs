//! Columnar decoder: Parquet file bytes to typed records.
//!
//! - [`layout`] — per-schema column specifications (required/optional,
//!   aliases, target type)
//! - [`row`] — type coercion of decoded Arrow columns and positional row
//!   access across them
//! - [`decoder`] — [`ColumnarDecoder`], envelope validation, column
//!   directory resolution and row-group iteration
//! - [`schemas`] — [`FromRow`] mappings for the four record schemas

mod decoder;
mod layout;
mod row;
mod schemas;

pub use decoder::{
    decode_roster, decode_schedules, decode_seasonal_stats, decode_weekly_stats,
    ColumnarDecoder, ColumnarDecoderConfig, DecodeContext, FromRow,
};
pub use layout::{ColumnSpec, ColumnType};
pub use row::Row;
