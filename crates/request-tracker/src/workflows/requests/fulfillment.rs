use super::classifier::classify;
use super::domain::{ClassificationResult, FulfillmentEvent, OpenRequest};
use super::record::Record;
use super::schema::SchemaModel;
use serde::Serialize;
use tracing::{info, warn};

/// Snapshots of one request record, oldest first. Snapshots sharing a
/// timestamp keep the order they were ingested in.
#[derive(Debug, Clone)]
pub struct RequestHistory {
    key: String,
    household: String,
    snapshots: Vec<Record>,
}

impl RequestHistory {
    /// The history is keyed by the first snapshot's record id, falling back
    /// to `household` when the snapshots carry no id.
    pub fn new(household: &str, mut snapshots: Vec<Record>) -> Self {
        snapshots.sort_by_key(|record| record.snapshot);
        let key = snapshots
            .first()
            .map(|record| record.history_key().to_string())
            .unwrap_or_else(|| household.to_string());
        Self {
            key,
            household: household.to_string(),
            snapshots,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn household(&self) -> &str {
        &self.household
    }

    pub fn snapshots(&self) -> &[Record] {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&Record> {
        self.snapshots.last()
    }

    /// Adjacent snapshots captured at the same instant.
    pub fn timestamp_ties(&self) -> Vec<&Record> {
        self.snapshots
            .windows(2)
            .filter(|pair| pair[0].snapshot == pair[1].snapshot)
            .map(|pair| &pair[1])
            .collect()
    }
}

/// Walks a request's snapshots in order and reports every item that was
/// open in one snapshot and delivered in the next. Missed items count as open.
pub fn detect_fulfillments(history: &RequestHistory, schema: &SchemaModel) -> Vec<FulfillmentEvent> {
    let mut events = Vec::new();
    if history.snapshots.len() < 2 {
        return events;
    }

    let mut previous: Option<ClassificationResult> = None;
    for snapshot in &history.snapshots {
        let current = classify(snapshot, schema);
        if let Some(before) = &previous {
            collect_transitions(before, &current, snapshot, &history.household, &mut events);
        }
        previous = Some(current);
    }

    events
}

// Events follow the earlier snapshot's open order.
fn collect_transitions(
    before: &ClassificationResult,
    after: &ClassificationResult,
    snapshot: &Record,
    household: &str,
    events: &mut Vec<FulfillmentEvent>,
) {
    for (field, previous) in before.fields() {
        let Some(statuses) = after.field(field) else {
            continue;
        };
        for tag in &previous.open {
            if statuses.delivered.contains(tag) {
                events.push(FulfillmentEvent {
                    request_type: field.to_string(),
                    delivered_item: tag.clone(),
                    date_delivered: snapshot.snapshot.date(),
                    household_reference: household.to_string(),
                });
            }
        }
    }
}

/// Items still open in the request's latest snapshot.
pub fn open_requests(history: &RequestHistory, schema: &SchemaModel) -> Vec<OpenRequest> {
    let Some(latest) = history.latest() else {
        return Vec::new();
    };

    let result = classify(latest, schema);
    result
        .fields()
        .flat_map(|(field, statuses)| {
            statuses.open.iter().map(move |tag| OpenRequest {
                request_type: field.to_string(),
                item: tag.clone(),
                missed: statuses.missed.contains(tag),
                snapshot_date: latest.snapshot.date(),
                household_reference: history.household.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub histories: usize,
    pub single_snapshot_histories: usize,
    pub snapshots: usize,
    pub timestamp_ties: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FulfillmentAnalysis {
    pub events: Vec<FulfillmentEvent>,
    pub open_requests: Vec<OpenRequest>,
    pub stats: AnalysisStats,
}

/// Runs fulfillment detection and the open-request listing over many
/// request histories. Output follows the order of `histories`.
pub fn analyze_histories(histories: &[RequestHistory], schema: &SchemaModel) -> FulfillmentAnalysis {
    let mut analysis = FulfillmentAnalysis::default();

    for history in histories {
        analysis.stats.histories += 1;
        analysis.stats.snapshots += history.snapshots.len();

        for tie in history.timestamp_ties() {
            warn!(
                request = %history.key,
                household = %history.household,
                snapshot = %tie.snapshot,
                "snapshots share a timestamp; keeping ingestion order"
            );
            analysis.stats.timestamp_ties += 1;
        }

        if history.snapshots.len() < 2 {
            analysis.stats.single_snapshot_histories += 1;
        } else {
            analysis.events.extend(detect_fulfillments(history, schema));
        }
        analysis.open_requests.extend(open_requests(history, schema));
    }

    info!(
        histories = analysis.stats.histories,
        skipped = analysis.stats.single_snapshot_histories,
        fulfilled = analysis.events.len(),
        open = analysis.open_requests.len(),
        "analyzed request history"
    );

    analysis
}
