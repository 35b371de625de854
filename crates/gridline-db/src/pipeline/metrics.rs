//! Aggregate counters for a load run.

use super::coordinator::FileStatus;

/// Totals across every file of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Files decoded and synchronized.
    pub files_synced: usize,
    /// Files absent from the filesystem.
    pub files_missing: usize,
    /// Files that could not be read or decoded.
    pub files_errored: usize,
    /// Records seen by the synchronization engine.
    pub attempted: usize,
    /// Records written.
    pub applied: usize,
    /// Records without a natural key.
    pub skipped: usize,
    /// Records whose write failed.
    pub failed: usize,
}

impl RunTotals {
    /// Folds one file's status into the totals.
    pub fn record(&mut self, status: &FileStatus) {
        match status {
            FileStatus::Synced(report) => {
                self.files_synced += 1;
                self.attempted += report.attempted;
                self.applied += report.applied;
                self.skipped += report.skipped;
                self.failed += report.failed;
            }
            FileStatus::Missing => self.files_missing += 1,
            FileStatus::ReadFailed(_) | FileStatus::DecodeFailed(_) => self.files_errored += 1,
        }
    }

    /// True when every present file loaded and every keyed record was
    /// written.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.files_errored == 0 && self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SyncReport;

    #[test]
    fn test_record_accumulates() {
        let mut totals = RunTotals::default();
        totals.record(&FileStatus::Synced(SyncReport {
            attempted: 4,
            applied: 3,
            inserted: 3,
            skipped: 1,
            ..SyncReport::new("players")
        }));
        totals.record(&FileStatus::Missing);
        totals.record(&FileStatus::DecodeFailed("structural error: too short".into()));

        assert_eq!(totals.files_synced, 1);
        assert_eq!(totals.files_missing, 1);
        assert_eq!(totals.files_errored, 1);
        assert_eq!((totals.attempted, totals.applied, totals.skipped), (4, 3, 1));
        assert!(!totals.is_clean());
    }
}
