//! CSV loader and in-memory case table
//!
//! The table is read once at startup and never mutated afterwards. Filtered
//! views borrow from it and live only as long as the request that built them.

use super::error::{LoadError, LoadResult};
use super::types::{CaseRecord, RawCaseRow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "age_group",
    "gender",
    "outcome",
    "episode_date",
    "date_since_first_case",
];

/// Immutable table of case records
#[derive(Debug, Clone, Default)]
pub struct CaseTable {
    records: Vec<CaseRecord>,
}

impl CaseTable {
    /// Load a table from a CSV file
    pub fn load(path: &Path) -> LoadResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = table.len(),
            "Loaded case table"
        );
        Ok(table)
    }

    /// Load a table from any reader producing headered CSV
    pub fn from_reader<R: Read>(reader: R) -> LoadResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            let raw: RawCaseRow =
                row.deserialize(Some(&headers))
                    .map_err(|e| LoadError::InvalidRow {
                        line,
                        message: e.to_string(),
                    })?;

            let episode_date =
                parse_episode_date(&raw.episode_date).ok_or_else(|| LoadError::InvalidDate {
                    line,
                    value: raw.episode_date.clone(),
                })?;

            records.push(CaseRecord {
                age_group: raw.age_group,
                gender: raw.gender,
                outcome: raw.outcome,
                episode_date,
                date_since_first_case: raw.date_since_first_case,
            });
        }

        Ok(Self { records })
    }

    /// Load from a CSV string (useful for testing)
    pub fn from_csv_str(csv_data: &str) -> LoadResult<Self> {
        Self::from_reader(csv_data.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in file order
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Smallest and largest `date_since_first_case`, or `None` for an empty table
    pub fn offset_range(&self) -> Option<(i64, i64)> {
        let mut offsets = self.records.iter().map(|r| r.date_since_first_case);
        let first = offsets.next()?;
        Some(offsets.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Records reported on or before day offset `d`, in file order
    pub fn filter_through(&self, d: i64) -> Vec<&CaseRecord> {
        self.records
            .iter()
            .filter(|r| r.date_since_first_case <= d)
            .collect()
    }
}

/// Parse an episode date, keeping only the calendar date
pub fn parse_episode_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let datetime_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    let date_formats = ["%m/%d/%Y", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "_id,age_group,gender,outcome,episode_date,date_since_first_case
1,20-29,FEMALE,ACTIVE,2020-01-21,0
2,60-69,MALE,FATAL,2020-01-24,3
3,20-29,MALE,ACTIVE,2020-01-28,7";

    #[test]
    fn test_load_from_str() {
        let table = CaseTable::from_csv_str(SAMPLE).unwrap();

        assert_eq!(table.len(), 3);
        let first = &table.records()[0];
        assert_eq!(first.age_group, "20-29");
        assert_eq!(first.gender, "FEMALE");
        assert_eq!(
            first.episode_date,
            NaiveDate::from_ymd_opt(2020, 1, 21).unwrap()
        );
        assert_eq!(table.offset_range(), Some((0, 7)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = CaseTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CaseTable::load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_missing_column() {
        let csv_data = "age_group,gender,outcome,date_since_first_case
20-29,FEMALE,ACTIVE,0";
        let err = CaseTable::from_csv_str(csv_data).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("episode_date")));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv_data = "age_group,gender,outcome,episode_date,date_since_first_case
20-29,FEMALE,ACTIVE,2020-01-21,0
30-39,MALE,ACTIVE,not-a-date,1";
        let err = CaseTable::from_csv_str(csv_data).unwrap_err();
        match err {
            LoadError::InvalidDate { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_offset_is_invalid_row() {
        let csv_data = "age_group,gender,outcome,episode_date,date_since_first_case
20-29,FEMALE,ACTIVE,2020-01-21,soon";
        let err = CaseTable::from_csv_str(csv_data).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn test_empty_table() {
        let csv_data = "age_group,gender,outcome,episode_date,date_since_first_case\n";
        let table = CaseTable::from_csv_str(csv_data).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.offset_range(), None);
        assert!(table.filter_through(100).is_empty());
    }

    #[test]
    fn test_filter_through() {
        let table = CaseTable::from_csv_str(SAMPLE).unwrap();

        assert_eq!(table.filter_through(-1).len(), 0);
        assert_eq!(table.filter_through(0).len(), 1);
        assert_eq!(table.filter_through(3).len(), 2);
        assert_eq!(table.filter_through(7).len(), 3);
    }

    #[test]
    fn test_filter_is_monotonic() {
        let table = CaseTable::from_csv_str(SAMPLE).unwrap();

        let counts: Vec<usize> = (-2..10).map(|d| table.filter_through(d).len()).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_parse_episode_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 15);
        assert_eq!(parse_episode_date("2020-03-15"), expected);
        assert_eq!(parse_episode_date("2020-03-15T00:00:00"), expected);
        assert_eq!(parse_episode_date("2020-03-15 08:30:00"), expected);
        assert_eq!(parse_episode_date("03/15/2020"), expected);
        assert_eq!(parse_episode_date("2020/03/15"), expected);
        assert_eq!(parse_episode_date("2020-03-15T08:30:00Z"), expected);
        assert_eq!(parse_episode_date("March"), None);
    }
}
