use super::SchemaModel;
use serde::Serialize;
use std::io::Write;

/// One item rule flattened into a spreadsheet-friendly row. Tag lists are
/// joined with newlines so each cell stays readable in a sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatSchemaRow {
    pub request_field: String,
    pub status_field: String,
    pub parent_request_field: String,
    pub parent_status_field: String,
    pub request_tag: String,
    pub delivered_tags: String,
    pub timeout_tags: String,
    pub invalid_tags: String,
    pub missed_tags: String,
    pub active: bool,
    pub inherit_delivered_from_parent: bool,
}

pub fn flat_rows(model: &SchemaModel) -> Vec<FlatSchemaRow> {
    model
        .flatten()
        .into_iter()
        .map(|item| FlatSchemaRow {
            request_field: item.schema.request_field.clone(),
            status_field: item.schema.status_field.clone(),
            parent_request_field: item
                .parent
                .map(|parent| parent.request_field.clone())
                .unwrap_or_default(),
            parent_status_field: item
                .parent
                .map(|parent| parent.status_field.clone())
                .unwrap_or_default(),
            request_tag: item.tag.to_string(),
            delivered_tags: item.rule.delivered.join("\n"),
            timeout_tags: item.rule.timeout.join("\n"),
            invalid_tags: item.rule.invalid.join("\n"),
            missed_tags: item.rule.missed.clone().unwrap_or_default(),
            active: item.rule.active,
            inherit_delivered_from_parent: item.rule.inherit_delivered_from_parent,
        })
        .collect()
}

/// Writes the flattened schema as CSV with a header row.
pub fn write_schema_csv<W: Write>(model: &SchemaModel, writer: W) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let rows = flat_rows(model);
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}
