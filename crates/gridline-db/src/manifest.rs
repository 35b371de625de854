//! Declarative list of files to load.
//!
//! Each [`ManifestEntry`] names one columnar file, the entity kind it
//! holds, and the season context the decoder attaches to its records.

use std::fmt;
use std::path::{Path, PathBuf};

use gridline_connectors::DecodeContext;
use gridline_core::{EntityKind, REGPOST};
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// One file to decode and synchronize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Entity kind the file holds.
    pub kind: EntityKind,
    /// Season the file covers; unused for schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    /// Season type for seasonal statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_type: Option<String>,
    /// Location of the file.
    pub path: PathBuf,
}

impl ManifestEntry {
    /// Decode context carrying this entry's season and season type.
    #[must_use]
    pub fn context(&self) -> DecodeContext {
        DecodeContext {
            season: self.season,
            season_type: self.season_type.clone(),
        }
    }

    fn validate(&self) -> Result<(), DbError> {
        if self.kind.requires_season() && self.season.is_none() {
            return Err(DbError::Manifest(format!(
                "{} entry for {} has no season",
                self.kind,
                self.path.display()
            )));
        }
        if self.kind.requires_season_type() && self.season_type.is_none() {
            return Err(DbError::Manifest(format!(
                "{} entry for {} has no season_type",
                self.kind,
                self.path.display()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(season) = self.season {
            write!(f, " {season}")?;
        }
        if let Some(season_type) = &self.season_type {
            write!(f, " {season_type}")?;
        }
        write!(f, " ({})", self.path.display())
    }
}

/// Ordered list of files to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Builds a manifest from entries, checking each carries the context
    /// its kind requires.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Manifest` for an entry missing its season or
    /// season type.
    pub fn new(entries: Vec<ManifestEntry>) -> Result<Self, DbError> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    /// The standard cache layout: the schedule file, then one roster file
    /// per roster year, then seasonal (`REGPOST`) and weekly statistics
    /// per stats year.
    ///
    /// ```text
    /// {cache_dir}/games.parquet
    /// {cache_dir}/roster_{year}.parquet
    /// {cache_dir}/player_stats_regpost_{year}.parquet
    /// {cache_dir}/player_stats_weekly_{year}.parquet
    /// ```
    #[must_use]
    pub fn standard(cache_dir: &Path, roster_years: &[i32], stats_years: &[i32]) -> Self {
        let mut entries = vec![ManifestEntry {
            kind: EntityKind::Game,
            season: None,
            season_type: None,
            path: cache_dir.join("games.parquet"),
        }];
        entries.extend(roster_years.iter().map(|&year| ManifestEntry {
            kind: EntityKind::Roster,
            season: Some(year),
            season_type: None,
            path: cache_dir.join(format!("roster_{year}.parquet")),
        }));
        entries.extend(stats_years.iter().map(|&year| ManifestEntry {
            kind: EntityKind::SeasonalStat,
            season: Some(year),
            season_type: Some(REGPOST.to_string()),
            path: cache_dir.join(format!("player_stats_regpost_{year}.parquet")),
        }));
        entries.extend(stats_years.iter().map(|&year| ManifestEntry {
            kind: EntityKind::WeeklyStat,
            season: Some(year),
            season_type: None,
            path: cache_dir.join(format!("player_stats_weekly_{year}.parquet")),
        }));
        Self { entries }
    }

    /// Parses a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Manifest` if the JSON is malformed or an entry
    /// lacks required context.
    pub fn from_json_str(json: &str) -> Result<Self, DbError> {
        let entries: Vec<ManifestEntry> =
            serde_json::from_str(json).map_err(|e| DbError::Manifest(e.to_string()))?;
        Self::new(entries)
    }

    /// Reads and parses a JSON manifest file. Relative entry paths are
    /// resolved against the manifest's directory.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Io` if the file cannot be read, or
    /// `DbError::Manifest` if it does not parse.
    pub fn from_json_file(path: &Path) -> Result<Self, DbError> {
        let json = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            for entry in &mut manifest.entries {
                if entry.path.is_relative() {
                    entry.path = base.join(&entry.path);
                }
            }
        }
        Ok(manifest)
    }

    /// Entries in load order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there is nothing to load.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct entity kinds present, in first-appearance order.
    #[must_use]
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        for entry in &self.entries {
            if !kinds.contains(&entry.kind) {
                kinds.push(entry.kind);
            }
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let manifest = Manifest::standard(Path::new("cache"), &[2023, 2024], &[2024]);
        let cache = Path::new("cache");
        let paths: Vec<PathBuf> = manifest.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                cache.join("games.parquet"),
                cache.join("roster_2023.parquet"),
                cache.join("roster_2024.parquet"),
                cache.join("player_stats_regpost_2024.parquet"),
                cache.join("player_stats_weekly_2024.parquet"),
            ]
        );
        assert_eq!(manifest.entries()[3].season_type.as_deref(), Some(REGPOST));
        assert_eq!(manifest.kinds(), EntityKind::ALL.to_vec());
    }

    #[test]
    fn test_from_json() {
        let manifest = Manifest::from_json_str(
            r#"[
                {"kind": "game", "path": "games.parquet"},
                {"kind": "weekly_stat", "season": 2023, "path": "w.parquet"}
            ]"#,
        )
        .unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries()[1].context().season, Some(2023));
    }

    #[test]
    fn test_entry_missing_season_rejected() {
        let err = Manifest::from_json_str(r#"[{"kind": "roster", "path": "r.parquet"}]"#)
            .unwrap_err();
        assert!(matches!(err, DbError::Manifest(msg) if msg.contains("no season")));
    }

    #[test]
    fn test_seasonal_entry_requires_season_type() {
        let err = Manifest::from_json_str(
            r#"[{"kind": "seasonal_stat", "season": 2024, "path": "s.parquet"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DbError::Manifest(msg) if msg.contains("season_type")));
    }

    #[test]
    fn test_relative_paths_resolved_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, r#"[{"kind": "game", "path": "games.parquet"}]"#).unwrap();
        let manifest = Manifest::from_json_file(&path).unwrap();
        assert_eq!(manifest.entries()[0].path, dir.path().join("games.parquet"));
    }

    #[test]
    fn test_display() {
        let entry = ManifestEntry {
            kind: EntityKind::SeasonalStat,
            season: Some(2024),
            season_type: Some(REGPOST.into()),
            path: PathBuf::from("s.parquet"),
        };
        assert_eq!(entry.to_string(), "seasonal_stat 2024 REGPOST (s.parquet)");
    }
}
