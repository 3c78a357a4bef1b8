use super::domain::{ClassificationResult, RequestBucket};
use super::record::Record;
use super::schema::{ItemRule, RequestSchema, SchemaModel};
use std::collections::HashSet;
use tracing::debug;

/// Partitions every requested item in `record` by outcome, across all
/// top-level categories and every nested level reached through them.
pub fn classify(record: &Record, schema: &SchemaModel) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    let root = Inherited::default();
    for request_schema in schema.schemas() {
        classify_level(record, request_schema, &root, &mut result);
    }
    result
}

/// Tags handed down from the enclosing item rules.
#[derive(Debug, Default)]
struct Inherited<'a> {
    timeout: Vec<&'a str>,
    delivered: Vec<&'a str>,
}

fn classify_level<'a>(
    record: &Record,
    schema: &'a RequestSchema,
    inherited: &Inherited<'a>,
    result: &mut ClassificationResult,
) {
    result.entry(&schema.request_field);
    let statuses: HashSet<&str> = record
        .tags(&schema.status_field)
        .iter()
        .map(String::as_str)
        .collect();

    for tag in record.tags(&schema.request_field) {
        let Some(rule) = schema.rule(tag) else {
            debug!(
                household = %record.household,
                field = %schema.request_field,
                tag = %tag,
                "skipping unknown request tag"
            );
            continue;
        };

        let effective = effective_tags(rule, inherited);
        if let Some(nested) = rule.nested() {
            classify_level(record, nested, &effective, result);
            continue;
        }

        let bucket = bucket_for(rule, &effective, &statuses);
        result.entry(&schema.request_field).record(bucket, tag);
    }
}

fn effective_tags<'a>(rule: &'a ItemRule, inherited: &Inherited<'a>) -> Inherited<'a> {
    let mut delivered: Vec<&str> = rule.delivered.iter().map(String::as_str).collect();
    if rule.inherit_delivered_from_parent {
        delivered.extend(inherited.delivered.iter().copied());
    }

    let mut timeout: Vec<&str> = rule.timeout.iter().map(String::as_str).collect();
    timeout.extend(inherited.timeout.iter().copied());

    Inherited { timeout, delivered }
}

fn bucket_for(
    rule: &ItemRule,
    effective: &Inherited<'_>,
    statuses: &HashSet<&str>,
) -> RequestBucket {
    if any_present(&effective.delivered, statuses) {
        RequestBucket::Delivered
    } else if any_present(&effective.timeout, statuses) {
        RequestBucket::Timeout
    } else if rule.invalid.iter().any(|tag| statuses.contains(tag.as_str())) {
        RequestBucket::Invalid
    } else if rule
        .missed
        .as_deref()
        .is_some_and(|missed| statuses.contains(missed))
    {
        RequestBucket::Missed
    } else {
        RequestBucket::Open
    }
}

fn any_present(tags: &[&str], statuses: &HashSet<&str>) -> bool {
    tags.iter().any(|tag| statuses.contains(*tag))
}
