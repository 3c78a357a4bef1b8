use super::schema::standard::PHONE_FIELD;
use super::schema::SchemaModel;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const ID_KEY: &str = "id";
const CREATED_TIME_KEY: &str = "createdTime";
const FIELDS_KEY: &str = "fields";

/// One household's request record as captured in a snapshot. Every field is
/// held as a list of strings; scalar values become one-element lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: Option<String>,
    pub household: String,
    pub snapshot: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
    fields: BTreeMap<String, Vec<String>>,
}

impl Record {
    pub fn new(household: &str, snapshot: NaiveDateTime) -> Self {
        Self {
            id: None,
            household: household.to_string(),
            snapshot,
            created_at: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: &str, values: &[&str]) -> Self {
        self.fields.insert(
            field.to_string(),
            values.iter().map(|value| value.to_string()).collect(),
        );
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Identifies the same request across snapshots: the record id, or the
    /// household when the export carried no id.
    pub fn history_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.household)
    }

    /// Tags held by a field; absent fields read as empty.
    pub fn tags(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn scalar(&self, field: &str) -> Option<&str> {
        self.tags(field).first().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    /// Builds a record from an exported row. Accepts either a flat object of
    /// fields or an object whose fields sit under `"fields"` next to `"id"` and
    /// `"createdTime"`. Rows without a household value are referenced by their
    /// id instead.
    pub fn from_json(
        value: &Value,
        household_field: &str,
        snapshot: NaiveDateTime,
    ) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        let field_map = match object.get(FIELDS_KEY) {
            Some(Value::Object(fields)) => fields,
            _ => object,
        };

        let fields = collect_fields(field_map);
        let id = object
            .get(ID_KEY)
            .and_then(scalar_to_string)
            .filter(|id| !id.trim().is_empty());
        let household = fields
            .get(household_field)
            .and_then(|values| values.first())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| id.clone())
            .ok_or_else(|| RecordError::MissingHousehold {
                field: household_field.to_string(),
            })?;

        let created_at = match object
            .get(CREATED_TIME_KEY)
            .or_else(|| field_map.get(CREATED_TIME_KEY))
            .and_then(Value::as_str)
        {
            Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                RecordError::InvalidTimestamp {
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            id,
            household,
            snapshot,
            created_at,
            fields,
        })
    }

    /// Rewrites legacy field names and tags to their canonical forms. When a
    /// legacy field and its replacement are both present the replacement's
    /// values come first; duplicates are dropped.
    pub fn normalized(self, schema: &SchemaModel) -> Self {
        let mut canonical: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let (renamed, current): (Vec<_>, Vec<_>) = self
            .fields
            .into_iter()
            .partition(|(field, _)| schema.canonical_field(field) != field.as_str());

        for (field, values) in current.into_iter().chain(renamed) {
            let target = canonical
                .entry(schema.canonical_field(&field).to_string())
                .or_default();
            for value in values {
                let tag = schema.canonical_tag(&value).to_string();
                if !target.contains(&tag) {
                    target.push(tag);
                }
            }
        }

        Self {
            fields: canonical,
            ..self
        }
    }
}

fn collect_fields(map: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    map.iter()
        .filter(|(field, _)| field.as_str() != CREATED_TIME_KEY)
        .filter_map(|(field, value)| {
            let values: Vec<String> = match value {
                Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
                other => scalar_to_string(other).into_iter().collect(),
            };
            (!values.is_empty()).then(|| (field.clone(), values))
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// How raw rows become normalized records.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions<'a> {
    pub household_field: &'a str,
    pub schema: &'a SchemaModel,
}

impl<'a> IngestOptions<'a> {
    pub fn new(schema: &'a SchemaModel) -> Self {
        Self {
            household_field: PHONE_FIELD,
            schema,
        }
    }

    pub fn with_household_field(mut self, household_field: &'a str) -> Self {
        self.household_field = household_field;
        self
    }

    pub fn ingest(&self, value: &Value, snapshot: NaiveDateTime) -> Result<Record, RecordError> {
        Record::from_json(value, self.household_field, snapshot)
            .map(|record| record.normalized(self.schema))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no id and no value for household field '{field}'")]
    MissingHousehold { field: String },
    #[error("record has an unparseable creation time '{value}'")]
    InvalidTimestamp { value: String },
}
