mod common;

use common::{at, fixture};
use request_tracker::workflows::requests::schema::write_schema_csv;
use request_tracker::workflows::requests::{
    classify, IngestOptions, Record, SchemaError, SchemaModel,
};
use serde_json::json;

fn fixture_schema() -> SchemaModel {
    SchemaModel::from_path(fixture("requests-schema.yaml")).expect("fixture schema loads")
}

#[test]
fn yaml_schema_drives_classification() {
    let schema = fixture_schema();
    assert_eq!(
        schema.request_fields(),
        vec!["Pantry Requests", "Furniture Items", "Services Requests"]
    );

    let record = Record::new("555-0100", at(2024, 3, 1))
        .with_field("Pantry Requests", &["Rice", "Furniture"])
        .with_field("Furniture Items", &["Bed"])
        .with_field("Pantry Status", &["Furniture Delivered", "Missed Pantry Pickup"])
        .with_field("Services Requests", &["Tutoring"])
        .with_field("Services Status", &["No Longer Interested in Tutoring"]);

    let result = classify(&record, &schema);
    let pantry = result.field("Pantry Requests").expect("pantry classified");
    assert_eq!(pantry.missed, vec!["Rice"]);
    assert_eq!(pantry.open, vec!["Rice"]);
    assert_eq!(
        result.field("Furniture Items").expect("furniture").delivered,
        vec!["Bed"]
    );
    assert_eq!(
        result.field("Services Requests").expect("services").invalid,
        vec!["Tutoring"]
    );
}

#[test]
fn yaml_aliases_apply_on_ingestion() {
    let schema = fixture_schema();
    let row = json!({
        "Phone Number": "555-0100",
        "Pantry Requests": ["Arroz", "Furniture"],
        "Old Furniture Items": "Bed",
        "Pantry Status": ["Rice Delivered", "Furniture Timeout"]
    });

    let record = IngestOptions::new(&schema)
        .ingest(&row, at(2024, 3, 1))
        .expect("row ingests");
    assert_eq!(record.tags("Pantry Requests"), ["Rice", "Furniture"]);
    assert_eq!(record.tags("Furniture Items"), ["Bed"]);
    assert!(record.tags("Old Furniture Items").is_empty());

    let result = classify(&record, &schema);
    assert_eq!(result.field("Pantry Requests").expect("pantry").delivered, vec!["Rice"]);
    assert_eq!(
        result.field("Furniture Items").expect("furniture").timeout,
        vec!["Bed"]
    );
}

#[test]
fn exported_rows_cover_every_level() {
    let schema = fixture_schema();
    let mut buffer = Vec::new();
    let written = write_schema_csv(&schema, &mut buffer).expect("schema exports");
    assert_eq!(written, 5);

    let csv = String::from_utf8(buffer).expect("utf8 output");
    let mut lines = csv.lines();
    let header = lines.next().expect("header row");
    assert!(header.starts_with("request_field,status_field,parent_request_field"));

    let bed = csv
        .lines()
        .find(|line| line.starts_with("Furniture Items,"))
        .expect("nested row exported");
    assert!(bed.contains("Pantry Requests"));
    assert!(bed.ends_with("true,true"));

    let masks = csv
        .lines()
        .find(|line| line.contains("Masks"))
        .expect("inactive row exported");
    assert!(masks.ends_with("false,false"));
}

#[test]
fn unsupported_extensions_are_rejected() {
    match SchemaModel::from_path(fixture("snapshots")) {
        Err(SchemaError::UnsupportedFormat { path }) => assert!(path.ends_with("snapshots")),
        other => panic!("expected unsupported format, got {other:?}"),
    }
}

#[test]
fn missing_schema_files_surface_io_errors() {
    assert!(matches!(
        SchemaModel::from_path(fixture("missing.yaml")),
        Err(SchemaError::Io(_))
    ));
}
