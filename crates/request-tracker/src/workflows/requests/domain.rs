use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestBucket {
    Delivered,
    Timeout,
    Invalid,
    Missed,
    Open,
}

impl RequestBucket {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Delivered,
            Self::Timeout,
            Self::Invalid,
            Self::Missed,
            Self::Open,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::Timeout => "Timed Out",
            Self::Invalid => "Invalid",
            Self::Missed => "Missed Appointment",
            Self::Open => "Open",
        }
    }
}

/// Requested items of one request field, partitioned by outcome. Tags keep
/// the order in which they were requested. Missed items are listed under both
/// `missed` and `open`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStatuses {
    pub delivered: Vec<String>,
    pub timeout: Vec<String>,
    pub invalid: Vec<String>,
    pub missed: Vec<String>,
    pub open: Vec<String>,
}

impl FieldStatuses {
    pub fn bucket(&self, bucket: RequestBucket) -> &[String] {
        match bucket {
            RequestBucket::Delivered => &self.delivered,
            RequestBucket::Timeout => &self.timeout,
            RequestBucket::Invalid => &self.invalid,
            RequestBucket::Missed => &self.missed,
            RequestBucket::Open => &self.open,
        }
    }

    fn bucket_mut(&mut self, bucket: RequestBucket) -> &mut Vec<String> {
        match bucket {
            RequestBucket::Delivered => &mut self.delivered,
            RequestBucket::Timeout => &mut self.timeout,
            RequestBucket::Invalid => &mut self.invalid,
            RequestBucket::Missed => &mut self.missed,
            RequestBucket::Open => &mut self.open,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        RequestBucket::ordered()
            .into_iter()
            .any(|bucket| self.bucket(bucket).iter().any(|existing| existing == tag))
    }

    /// Files a tag under its bucket. A tag already classified in this field
    /// is left where it is.
    pub(crate) fn record(&mut self, bucket: RequestBucket, tag: &str) {
        if self.contains(tag) {
            return;
        }
        if bucket == RequestBucket::Missed {
            self.missed.push(tag.to_string());
            self.open.push(tag.to_string());
        } else {
            self.bucket_mut(bucket).push(tag.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        RequestBucket::ordered()
            .into_iter()
            .all(|bucket| self.bucket(bucket).is_empty())
    }
}

/// Classification of one record, keyed by request field name at every
/// nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult {
    fields: BTreeMap<String, FieldStatuses>,
}

impl ClassificationResult {
    pub fn field(&self, request_field: &str) -> Option<&FieldStatuses> {
        self.fields.get(request_field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldStatuses)> {
        self.fields
            .iter()
            .map(|(field, statuses)| (field.as_str(), statuses))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn entry(&mut self, request_field: &str) -> &mut FieldStatuses {
        self.fields.entry(request_field.to_string()).or_default()
    }
}

/// An item that was open in one snapshot and delivered in the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEvent {
    pub request_type: String,
    pub delivered_item: String,
    pub date_delivered: NaiveDate,
    pub household_reference: String,
}

/// An item still outstanding in a household's latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequest {
    pub request_type: String,
    pub item: String,
    pub missed: bool,
    pub snapshot_date: NaiveDate,
    pub household_reference: String,
}
