use super::fulfillment::RequestHistory;
use super::record::{IngestOptions, Record, RecordError};
use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SNAPSHOT_EXTENSION: &str = "json";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
const TIMESTAMP_LEN: usize = 19;
const SNAPSHOT_ZONE: Tz = chrono_tz::America::New_York;

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    InvalidFileName { file: String },
    Json { file: String, source: serde_json::Error },
    Record { file: String, source: RecordError },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            SnapshotError::InvalidFileName { file } => write!(
                f,
                "snapshot file '{}' does not end with a YYYY-MM-DD-HH-MM-SS timestamp",
                file
            ),
            SnapshotError::Json { file, source } => {
                write!(f, "snapshot '{}' is not a JSON array of records: {}", file, source)
            }
            SnapshotError::Record { file, source } => {
                write!(f, "snapshot '{}' contains an unusable record: {}", file, source)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            SnapshotError::InvalidFileName { .. } => None,
            SnapshotError::Json { source, .. } => Some(source),
            SnapshotError::Record { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Records gathered from one or more snapshot exports, in ingestion order.
#[derive(Debug, Default)]
pub struct SnapshotSet {
    records: Vec<Record>,
    files: usize,
    skipped_records: usize,
}

impl SnapshotSet {
    /// Loads every `*.json` export in `dir`, in file-name order.
    pub fn load_dir<P: AsRef<Path>>(
        dir: P,
        ingest: &IngestOptions<'_>,
    ) -> Result<Self, SnapshotError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()?;
        paths.retain(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION))
        });
        paths.sort();

        let mut set = Self::default();
        for path in &paths {
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| SnapshotError::InvalidFileName {
                    file: path.display().to_string(),
                })?;
            let file = std::fs::File::open(path)?;
            set.push_reader(name, BufReader::new(file), ingest)?;
        }

        info!(
            dir = %dir.as_ref().display(),
            files = set.files,
            records = set.records.len(),
            skipped = set.skipped_records,
            "loaded request snapshots"
        );
        Ok(set)
    }

    pub fn from_reader<R: Read>(
        name: &str,
        reader: R,
        ingest: &IngestOptions<'_>,
    ) -> Result<Self, SnapshotError> {
        let mut set = Self::default();
        set.push_reader(name, reader, ingest)?;
        Ok(set)
    }

    /// Adds one export; `name` is the export's file name and carries its
    /// capture time. Returns the number of records kept.
    pub fn push_reader<R: Read>(
        &mut self,
        name: &str,
        reader: R,
        ingest: &IngestOptions<'_>,
    ) -> Result<usize, SnapshotError> {
        let snapshot = snapshot_time(name)?;
        let rows: Vec<Value> =
            serde_json::from_reader(reader).map_err(|source| SnapshotError::Json {
                file: name.to_string(),
                source,
            })?;

        let before = self.records.len();
        for row in &rows {
            match ingest.ingest(row, snapshot) {
                Ok(record) => self.records.push(record),
                Err(RecordError::MissingHousehold { field }) => {
                    debug!(file = name, field = %field, "skipping record without household");
                    self.skipped_records += 1;
                }
                Err(source) => {
                    return Err(SnapshotError::Record {
                        file: name.to_string(),
                        source,
                    })
                }
            }
        }

        self.files += 1;
        Ok(self.records.len() - before)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// Groups records into one history per request record, ordered by
    /// record id. Rows without an id are grouped by household instead.
    pub fn into_histories(self) -> Vec<RequestHistory> {
        let mut grouped: BTreeMap<String, Vec<Record>> = BTreeMap::new();
        for record in self.records {
            grouped
                .entry(record.history_key().to_string())
                .or_default()
                .push(record);
        }

        grouped
            .into_values()
            .filter_map(|records| {
                let household = records.first()?.household.clone();
                Some(RequestHistory::new(&household, records))
            })
            .collect()
    }
}

/// Capture time encoded at the end of an export's file name, e.g.
/// `assistance-requests-main-2023-04-01-09-30-00.json`. Exports are named in
/// New York local time; the result is naive UTC.
pub fn snapshot_time(file_name: &str) -> Result<NaiveDateTime, SnapshotError> {
    let invalid = || SnapshotError::InvalidFileName {
        file: file_name.to_string(),
    };
    let stem = file_name
        .strip_suffix(".json")
        .or_else(|| file_name.strip_suffix(".JSON"))
        .unwrap_or(file_name);
    let start = stem.len().checked_sub(TIMESTAMP_LEN).ok_or_else(invalid)?;
    let raw = stem.get(start..).ok_or_else(invalid)?;

    let local = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    SNAPSHOT_ZONE
        .from_local_datetime(&local)
        .earliest()
        .map(|time| time.naive_utc())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::super::schema::SchemaModel;
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn file_names_carry_the_capture_time_in_utc() {
        let parsed = snapshot_time("assistance-requests-main-2023-04-01-09-30-05.json")
            .expect("valid name");
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2023, 4, 1)
                .and_then(|date| date.and_hms_opt(13, 30, 5))
                .expect("valid time")
        );

        for bad in ["requests.json", "2023-04-01.json", "main-2023-13-01-09-30-05.json"] {
            assert!(
                matches!(snapshot_time(bad), Err(SnapshotError::InvalidFileName { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn evening_exports_land_on_the_next_utc_day() {
        let parsed = snapshot_time("assistance-requests-main-2024-03-01-21-00-00.json")
            .expect("valid name");
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 3, 2).expect("valid date"));
        assert_eq!(parsed.time().to_string(), "02:00:00");
    }

    #[test]
    fn readers_skip_records_without_household_or_id() {
        let schema = SchemaModel::standard();
        let ingest = IngestOptions::new(&schema);
        let rows = r#"[
            { "Phone Number": "555-0100", "Food Requests?": "Alimentos / Groceries / 食品" },
            { "Food Requests?": ["Alimentos / Groceries / 食品"] },
            { "id": "rec9", "fields": { "Food Requests?": ["Alimentos / Groceries / 食品"] } },
            { "fields": { "Phone Number": "555-0101" } }
        ]"#;

        let set = SnapshotSet::from_reader(
            "assistance-requests-main-2023-04-01-09-30-00.json",
            Cursor::new(rows),
            &ingest,
        )
        .expect("snapshot loads");

        assert_eq!(set.records().len(), 3);
        assert_eq!(set.skipped_records(), 1);
        assert_eq!(set.files(), 1);
        assert_eq!(set.records()[1].household, "rec9");
    }

    #[test]
    fn non_array_exports_are_rejected() {
        let schema = SchemaModel::standard();
        let ingest = IngestOptions::new(&schema);
        let error = SnapshotSet::from_reader(
            "assistance-requests-main-2023-04-01-09-30-00.json",
            Cursor::new(r#"{ "Phone Number": "555-0100" }"#),
            &ingest,
        )
        .expect_err("expected json error");

        match error {
            SnapshotError::Json { .. } => {}
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn load_dir_propagates_io_errors() {
        let schema = SchemaModel::standard();
        let error = SnapshotSet::load_dir("./does-not-exist", &IngestOptions::new(&schema))
            .expect_err("expected io error");

        match error {
            SnapshotError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_ids_group_by_household_in_key_order() {
        let schema = SchemaModel::standard();
        let ingest = IngestOptions::new(&schema);
        let mut set = SnapshotSet::default();
        set.push_reader(
            "main-2023-04-02-00-00-00.json",
            Cursor::new(r#"[{ "Phone Number": "b" }, { "Phone Number": "a" }]"#),
            &ingest,
        )
        .expect("first export");
        set.push_reader(
            "main-2023-04-01-00-00-00.json",
            Cursor::new(r#"[{ "Phone Number": "b" }]"#),
            &ingest,
        )
        .expect("second export");

        let histories = set.into_histories();
        let households: Vec<&str> = histories.iter().map(|history| history.household()).collect();
        assert_eq!(households, vec!["a", "b"]);

        let b = &histories[1];
        assert_eq!(b.snapshots().len(), 2);
        assert!(b.snapshots()[0].snapshot < b.snapshots()[1].snapshot);
    }

    #[test]
    fn records_sharing_a_household_keep_separate_histories() {
        let schema = SchemaModel::standard();
        let ingest = IngestOptions::new(&schema);
        let rows = r#"[
            { "id": "rec2", "fields": { "Phone Number": "555-0100" } },
            { "id": "rec1", "fields": { "Phone Number": "555-0100" } }
        ]"#;
        let mut set = SnapshotSet::default();
        for name in ["main-2023-04-01-12-00-00.json", "main-2023-04-02-12-00-00.json"] {
            set.push_reader(name, Cursor::new(rows), &ingest)
                .expect("export loads");
        }

        let histories = set.into_histories();
        let keys: Vec<&str> = histories.iter().map(|history| history.key()).collect();
        assert_eq!(keys, vec!["rec1", "rec2"]);
        for history in &histories {
            assert_eq!(history.household(), "555-0100");
            assert_eq!(history.snapshots().len(), 2);
            assert!(history.timestamp_ties().is_empty());
        }
    }
}
