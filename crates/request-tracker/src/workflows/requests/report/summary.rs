use super::super::domain::{FulfillmentEvent, OpenRequest};
use super::super::fulfillment::{AnalysisStats, FulfillmentAnalysis};
use super::views::{
    FulfilledRequestRow, FulfillmentReportSummary, OpenRequestRow, RequestTypeTotals,
};
use std::collections::BTreeMap;

/// Fulfillment results ordered for export: newest deliveries first, open
/// requests grouped by request type and household.
#[derive(Debug, Default)]
pub struct FulfillmentReport {
    pub events: Vec<FulfillmentEvent>,
    pub open_requests: Vec<OpenRequest>,
    pub stats: AnalysisStats,
}

impl FulfillmentReport {
    pub fn new(analysis: FulfillmentAnalysis) -> Self {
        let FulfillmentAnalysis {
            mut events,
            mut open_requests,
            stats,
        } = analysis;

        events.sort_by(|a, b| b.date_delivered.cmp(&a.date_delivered));
        open_requests.sort_by(|a, b| {
            a.request_type
                .cmp(&b.request_type)
                .then_with(|| a.household_reference.cmp(&b.household_reference))
        });

        Self {
            events,
            open_requests,
            stats,
        }
    }

    pub fn summary(&self) -> FulfillmentReportSummary {
        let mut totals: BTreeMap<&str, RequestTypeTotals> = BTreeMap::new();
        for event in &self.events {
            totals_for(&mut totals, &event.request_type).fulfilled += 1;
        }
        for request in &self.open_requests {
            let entry = totals_for(&mut totals, &request.request_type);
            entry.open += 1;
            if request.missed {
                entry.missed += 1;
            }
        }

        FulfillmentReportSummary {
            totals: totals.into_values().collect(),
            fulfilled: self.events.len(),
            open: self.open_requests.len(),
            latest_delivery: self.events.first().map(|event| event.date_delivered),
            stats: self.stats.clone(),
        }
    }

    pub fn fulfilled_rows(&self) -> Vec<FulfilledRequestRow> {
        self.events.iter().map(FulfilledRequestRow::from).collect()
    }

    pub fn open_rows(&self) -> Vec<OpenRequestRow> {
        self.open_requests.iter().map(OpenRequestRow::from).collect()
    }
}

fn totals_for<'a, 'b>(
    totals: &'b mut BTreeMap<&'a str, RequestTypeTotals>,
    request_type: &'a str,
) -> &'b mut RequestTypeTotals {
    totals
        .entry(request_type)
        .or_insert_with(|| RequestTypeTotals {
            request_type: request_type.to_string(),
            fulfilled: 0,
            open: 0,
            missed: 0,
        })
}
