use super::super::domain::{FulfillmentEvent, OpenRequest};
use super::super::fulfillment::AnalysisStats;
use chrono::NaiveDate;
use serde::Serialize;

/// Spreadsheet row for one fulfilled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfilledRequestRow {
    #[serde(rename = "Request Type")]
    pub request_type: String,
    #[serde(rename = "Delivered Item")]
    pub delivered_item: String,
    #[serde(rename = "Date Delivered")]
    pub date_delivered: NaiveDate,
    #[serde(rename = "Household")]
    pub household_reference: String,
}

impl From<&FulfillmentEvent> for FulfilledRequestRow {
    fn from(event: &FulfillmentEvent) -> Self {
        Self {
            request_type: event.request_type.clone(),
            delivered_item: event.delivered_item.clone(),
            date_delivered: event.date_delivered,
            household_reference: event.household_reference.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenRequestRow {
    #[serde(rename = "Request Type")]
    pub request_type: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Missed Appointment")]
    pub missed_appointment: &'static str,
    #[serde(rename = "Snapshot Date")]
    pub snapshot_date: NaiveDate,
    #[serde(rename = "Household")]
    pub household_reference: String,
}

impl From<&OpenRequest> for OpenRequestRow {
    fn from(request: &OpenRequest) -> Self {
        Self {
            request_type: request.request_type.clone(),
            item: request.item.clone(),
            missed_appointment: if request.missed { "Yes" } else { "No" },
            snapshot_date: request.snapshot_date,
            household_reference: request.household_reference.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTypeTotals {
    pub request_type: String,
    pub fulfilled: usize,
    pub open: usize,
    pub missed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentReportSummary {
    pub totals: Vec<RequestTypeTotals>,
    pub fulfilled: usize,
    pub open: usize,
    pub latest_delivery: Option<NaiveDate>,
    pub stats: AnalysisStats,
}
