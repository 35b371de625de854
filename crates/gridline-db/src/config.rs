//! Loader configuration.
//!
//! Defaults mirror the standard cache layout; every field can be
//! overridden from `GRIDLINE_*` environment variables.

use std::path::PathBuf;

use crate::error::DbError;
use crate::manifest::Manifest;

/// Cache directory holding the columnar snapshot files.
pub const ENV_CACHE_DIR: &str = "GRIDLINE_CACHE_DIR";
/// Path of the redb file; unset loads into memory only.
pub const ENV_STORE_PATH: &str = "GRIDLINE_STORE_PATH";
/// Logical database name.
pub const ENV_DATABASE: &str = "GRIDLINE_DATABASE";
/// Roster seasons, e.g. `2020-2024` or `2022,2024`.
pub const ENV_ROSTER_YEARS: &str = "GRIDLINE_ROSTER_YEARS";
/// Statistics seasons, same syntax as roster seasons.
pub const ENV_STATS_YEARS: &str = "GRIDLINE_STATS_YEARS";
/// JSON manifest replacing the standard layout.
pub const ENV_MANIFEST: &str = "GRIDLINE_MANIFEST";
/// Decoder read batch size.
pub const ENV_BATCH_SIZE: &str = "GRIDLINE_BATCH_SIZE";

/// Configuration for a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory holding the snapshot files.
    pub cache_dir: PathBuf,
    /// redb file to persist into (`None` = in-memory only).
    pub store_path: Option<PathBuf>,
    /// Logical database name; prefixes collection table names.
    pub database: String,
    /// Seasons to load rosters for.
    pub roster_years: Vec<i32>,
    /// Seasons to load seasonal and weekly statistics for.
    pub stats_years: Vec<i32>,
    /// Explicit manifest file, overriding the standard layout.
    pub manifest_path: Option<PathBuf>,
    /// Rows per decoded batch.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./nflverse_cache"),
            store_path: None,
            database: "nfl".to_string(),
            roster_years: (2020..=2024).collect(),
            stats_years: (2020..=2024).collect(),
            manifest_path: None,
            batch_size: 8192,
        }
    }
}

impl LoaderConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Config` for a malformed value.
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`. Unset and blank values keep the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Config` for a malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(dir) = get(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(path) = get(ENV_STORE_PATH) {
            config.store_path = Some(PathBuf::from(path));
        }
        if let Some(database) = get(ENV_DATABASE) {
            config.database = database;
        }
        if let Some(years) = get(ENV_ROSTER_YEARS) {
            config.roster_years = parse_years(ENV_ROSTER_YEARS, &years)?;
        }
        if let Some(years) = get(ENV_STATS_YEARS) {
            config.stats_years = parse_years(ENV_STATS_YEARS, &years)?;
        }
        if let Some(path) = get(ENV_MANIFEST) {
            config.manifest_path = Some(PathBuf::from(path));
        }
        if let Some(size) = get(ENV_BATCH_SIZE) {
            config.batch_size = match size.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(DbError::Config(format!(
                        "{ENV_BATCH_SIZE} must be a positive integer, got '{size}'"
                    )))
                }
            };
        }
        Ok(config)
    }

    /// The manifest to load: the configured manifest file if set,
    /// otherwise the standard layout under `cache_dir`.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the manifest file cannot be read or parsed.
    pub fn manifest(&self) -> Result<Manifest, DbError> {
        match &self.manifest_path {
            Some(path) => Manifest::from_json_file(path),
            None => Ok(Manifest::standard(
                &self.cache_dir,
                &self.roster_years,
                &self.stats_years,
            )),
        }
    }
}

/// Parses `2020-2024` (inclusive range) or `2020,2022,2024`; the two
/// forms can be mixed (`2018,2020-2022`).
fn parse_years(var: &str, value: &str) -> Result<Vec<i32>, DbError> {
    let invalid = || DbError::Config(format!("{var}: invalid year list '{value}'"));
    let mut years = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: i32 = start.trim().parse().map_err(|_| invalid())?;
                let end: i32 = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                years.extend(start..=end);
            }
            None => years.push(part.parse().map_err(|_| invalid())?),
        }
    }
    if years.is_empty() {
        return Err(invalid());
    }
    Ok(years)
}
