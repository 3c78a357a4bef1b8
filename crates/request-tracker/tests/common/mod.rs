#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use request_tracker::workflows::requests::{IngestOptions, Record, SchemaModel};
use serde_json::Value;
use std::path::PathBuf;

pub const HOUSEHOLD: &str = "555-0100";

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid snapshot time")
}

pub fn household_record(snapshot: NaiveDateTime) -> Record {
    Record::new(HOUSEHOLD, snapshot)
}

/// Ingests an export row against the standard schema, rewriting legacy names.
/// Rows without a phone number are attributed to [`HOUSEHOLD`].
pub fn ingest(mut row: Value) -> Record {
    let nested = matches!(row.get("fields"), Some(Value::Object(_)));
    let fields = if nested {
        row.get_mut("fields")
    } else {
        Some(&mut row)
    };
    if let Some(Value::Object(fields)) = fields {
        fields
            .entry("Phone Number")
            .or_insert_with(|| Value::from(HOUSEHOLD));
    }

    let schema = SchemaModel::standard();
    IngestOptions::new(&schema)
        .ingest(&row, at(2023, 1, 1))
        .expect("row ingests")
}

pub fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(path)
}
