//! Parquet decoder producing typed records.
//!
//! The complete file is handed over as bytes. Decoding proceeds in three
//! phases, and nothing is returned unless all of them succeed:
//!
//! 1. **Envelope** — length, leading/trailing `PAR1` magic and footer
//!    length are checked, then the footer metadata is parsed.
//! 2. **Column directory** — every column the record schema needs is
//!    matched against the file schema; a missing required column fails
//!    before any page is read.
//! 3. **Row groups** — non-empty row groups are read with projection
//!    pushdown, each projected column is coerced, and rows are rebuilt by
//!    position.

use arrow_schema::Schema;
use bytes::Bytes;
use gridline_core::{EntityKind, Game, Record, RosterEntry, SeasonalStat, WeeklyStat};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use tracing::debug;

use super::layout::ColumnSpec;
use super::row::{ResolvedColumn, Row, TypedBatch};
use crate::error::{DecodeError, DecodeResult};

const MAGIC: &[u8; 4] = b"PAR1";
const ENCRYPTED_MAGIC: &[u8; 4] = b"PARE";
/// Leading magic + footer length + trailing magic.
const MIN_FILE_LEN: usize = 12;

/// Operational context attached to every decoded record.
///
/// The file schema does not carry these; the caller knows which season
/// (and season type) a file belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeContext {
    /// Season the file covers.
    pub season: Option<i32>,
    /// Season type the file aggregates over.
    pub season_type: Option<String>,
}

impl DecodeContext {
    /// Context with a season.
    #[must_use]
    pub fn season(season: i32) -> Self {
        Self {
            season: Some(season),
            season_type: None,
        }
    }

    /// Sets the season type.
    #[must_use]
    pub fn with_season_type(mut self, season_type: impl Into<String>) -> Self {
        self.season_type = Some(season_type.into());
        self
    }

    fn validate(&self, kind: EntityKind) -> DecodeResult<()> {
        if kind.requires_season() && self.season.is_none() {
            return Err(DecodeError::MissingContext {
                kind,
                parameter: "season",
            });
        }
        if kind.requires_season_type() && self.season_type.is_none() {
            return Err(DecodeError::MissingContext {
                kind,
                parameter: "season type",
            });
        }
        Ok(())
    }

    pub(crate) fn season_or_default(&self) -> i32 {
        self.season.unwrap_or_default()
    }

    pub(crate) fn season_type_or_default(&self) -> String {
        self.season_type.clone().unwrap_or_default()
    }
}

/// A record that can be built from one decoded row.
pub trait FromRow: Record + Sized {
    /// Columns this schema reads.
    fn columns() -> Vec<ColumnSpec>;

    /// Builds a record from a row. The context has been validated for
    /// [`Record::KIND`].
    fn from_row(row: &Row<'_>, ctx: &DecodeContext) -> Self;
}

/// Configuration for the columnar decoder.
#[derive(Debug, Clone)]
pub struct ColumnarDecoderConfig {
    /// Maximum rows per internal record batch.
    pub batch_size: usize,
}

impl Default for ColumnarDecoderConfig {
    fn default() -> Self {
        Self { batch_size: 8192 }
    }
}

impl ColumnarDecoderConfig {
    /// Sets the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}

/// Decodes Parquet file bytes into typed records.
#[derive(Debug, Clone, Default)]
pub struct ColumnarDecoder {
    config: ColumnarDecoderConfig,
}

impl ColumnarDecoder {
    /// Creates a decoder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with custom configuration.
    #[must_use]
    pub fn with_config(config: ColumnarDecoderConfig) -> Self {
        Self { config }
    }

    /// Decodes a whole file into records of schema `R`.
    ///
    /// Records come back in file order: row groups in order, rows in order
    /// within each row group.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the context lacks a parameter `R` needs,
    /// the envelope or footer is invalid, a required column is missing or
    /// uncoercible, or column data is corrupt. No records are returned in
    /// any of these cases.
    pub fn decode<R: FromRow>(
        &self,
        bytes: impl Into<Bytes>,
        ctx: &DecodeContext,
    ) -> DecodeResult<Vec<R>> {
        let kind = R::KIND;
        ctx.validate(kind)?;

        let bytes: Bytes = bytes.into();
        validate_envelope(&bytes)?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)
            .map_err(|e| DecodeError::Structural(format!("footer metadata: {e}")))?;

        let resolved = resolve_columns(kind, &R::columns(), builder.schema())?;

        let row_groups: Vec<usize> = builder
            .metadata()
            .row_groups()
            .iter()
            .enumerate()
            .filter(|(_, rg)| rg.num_rows() > 0)
            .map(|(i, _)| i)
            .collect();

        if row_groups.is_empty() {
            debug!(%kind, "file has no non-empty row groups");
            return Ok(Vec::new());
        }
        let row_group_count = row_groups.len();

        let mask = ProjectionMask::roots(builder.parquet_schema(), resolved.iter().map(|c| c.index));
        let reader = builder
            .with_projection(mask)
            .with_row_groups(row_groups)
            .with_batch_size(self.config.batch_size)
            .build()
            .map_err(|e| DecodeError::Structural(format!("reader build: {e}")))?;

        let mut records = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| DecodeError::Corrupt(e.to_string()))?;
            let typed = TypedBatch::from_batch(&batch, &resolved)?;
            records.extend(typed.rows().map(|row| R::from_row(&row, ctx)));
        }

        debug!(
            %kind,
            row_groups = row_group_count,
            columns = resolved.len(),
            records = records.len(),
            "decoded columnar file"
        );
        Ok(records)
    }
}

/// Checks the file envelope before handing it to the footer parser.
fn validate_envelope(bytes: &[u8]) -> DecodeResult<()> {
    let len = bytes.len();
    if len < MIN_FILE_LEN {
        return Err(DecodeError::Structural(format!(
            "file is {len} bytes, shorter than the {MIN_FILE_LEN}-byte minimum"
        )));
    }
    if &bytes[..4] != MAGIC {
        return Err(DecodeError::Structural("missing leading PAR1 magic".into()));
    }
    let trailer = &bytes[len - 4..];
    if trailer == ENCRYPTED_MAGIC {
        return Err(DecodeError::Structural("encrypted footers are not supported".into()));
    }
    if trailer != MAGIC {
        return Err(DecodeError::Structural(
            "missing trailing PAR1 magic (file truncated?)".into(),
        ));
    }
    let mut footer_len = [0u8; 4];
    footer_len.copy_from_slice(&bytes[len - 8..len - 4]);
    let footer_len = u32::from_le_bytes(footer_len) as usize;
    if footer_len + MIN_FILE_LEN > len {
        return Err(DecodeError::Structural(format!(
            "footer length {footer_len} exceeds file size {len}"
        )));
    }
    Ok(())
}

/// Matches schema columns against the file's top-level fields.
///
/// Columns present in the file but not in `columns` are ignored.
fn resolve_columns(
    kind: EntityKind,
    columns: &[ColumnSpec],
    file_schema: &Schema,
) -> DecodeResult<Vec<ResolvedColumn>> {
    let mut resolved = Vec::with_capacity(columns.len());
    for spec in columns {
        let found = spec
            .candidates()
            .find_map(|name| file_schema.index_of(name).ok().map(|index| (name, index)));
        match found {
            Some((name, index)) => {
                let data_type = file_schema.field(index).data_type();
                if !arrow_cast::can_cast_types(data_type, &spec.ty.arrow_type()) {
                    return Err(DecodeError::ColumnType {
                        column: name.to_string(),
                        data_type: data_type.to_string(),
                        expected: spec.ty.name(),
                    });
                }
                resolved.push(ResolvedColumn {
                    spec: *spec,
                    file_name: name.to_string(),
                    index,
                });
            }
            None if spec.required => {
                return Err(DecodeError::SchemaMismatch {
                    kind,
                    column: spec.name.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(resolved)
}

/// Decodes a roster file for `season`.
///
/// # Errors
///
/// See [`ColumnarDecoder::decode`].
pub fn decode_roster(bytes: impl Into<Bytes>, season: i32) -> DecodeResult<Vec<RosterEntry>> {
    ColumnarDecoder::new().decode(bytes, &DecodeContext::season(season))
}

/// Decodes a schedules file. Seasons are read from the file.
///
/// # Errors
///
/// See [`ColumnarDecoder::decode`].
pub fn decode_schedules(bytes: impl Into<Bytes>) -> DecodeResult<Vec<Game>> {
    ColumnarDecoder::new().decode(bytes, &DecodeContext::default())
}

/// Decodes a seasonal player-stat file for `season` and `season_type`.
///
/// # Errors
///
/// See [`ColumnarDecoder::decode`].
pub fn decode_seasonal_stats(
    bytes: impl Into<Bytes>,
    season: i32,
    season_type: &str,
) -> DecodeResult<Vec<SeasonalStat>> {
    ColumnarDecoder::new().decode(
        bytes,
        &DecodeContext::season(season).with_season_type(season_type),
    )
}

/// Decodes a weekly player-stat file for `season`.
///
/// # Errors
///
/// See [`ColumnarDecoder::decode`].
pub fn decode_weekly_stats(bytes: impl Into<Bytes>, season: i32) -> DecodeResult<Vec<WeeklyStat>> {
    ColumnarDecoder::new().decode(bytes, &DecodeContext::season(season))
}
