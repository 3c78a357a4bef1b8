mod sink;
mod summary;
pub mod views;

pub use sink::{CsvReportSink, ReportError, ReportSink};
pub use summary::FulfillmentReport;

#[cfg(test)]
mod tests {
    use super::super::domain::{FulfillmentEvent, OpenRequest};
    use super::super::fulfillment::{AnalysisStats, FulfillmentAnalysis};
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).expect("valid date")
    }

    fn event(item: &str, d: u32) -> FulfillmentEvent {
        FulfillmentEvent {
            request_type: "Food Requests?".to_string(),
            delivered_item: item.to_string(),
            date_delivered: day(d),
            household_reference: "555-0100".to_string(),
        }
    }

    fn open(request_type: &str, household: &str, missed: bool) -> OpenRequest {
        OpenRequest {
            request_type: request_type.to_string(),
            item: "Soap".to_string(),
            missed,
            snapshot_date: day(9),
            household_reference: household.to_string(),
        }
    }

    fn report() -> FulfillmentReport {
        FulfillmentReport::new(FulfillmentAnalysis {
            events: vec![event("Groceries", 2), event("Hot meals", 5), event("Diapers", 2)],
            open_requests: vec![
                open("Essential Goods Requests?", "b", true),
                open("Essential Goods Requests?", "a", false),
                open("Food Requests?", "c", false),
            ],
            stats: AnalysisStats {
                histories: 3,
                single_snapshot_histories: 1,
                snapshots: 5,
                timestamp_ties: 0,
            },
        })
    }

    #[test]
    fn events_sort_newest_first_and_keep_ties_stable() {
        let items: Vec<String> = report()
            .events
            .into_iter()
            .map(|event| event.delivered_item)
            .collect();
        assert_eq!(items, vec!["Hot meals", "Groceries", "Diapers"]);
    }

    #[test]
    fn summary_totals_by_request_type() {
        let summary = report().summary();
        assert_eq!(summary.fulfilled, 3);
        assert_eq!(summary.open, 3);
        assert_eq!(summary.latest_delivery, Some(day(5)));

        let goods = &summary.totals[0];
        assert_eq!(goods.request_type, "Essential Goods Requests?");
        assert_eq!((goods.fulfilled, goods.open, goods.missed), (0, 2, 1));
        let food = &summary.totals[1];
        assert_eq!((food.fulfilled, food.open, food.missed), (3, 1, 0));
    }

    #[test]
    fn csv_sink_writes_spreadsheet_headers() {
        let report = report();
        let mut sink = CsvReportSink::new(Vec::new());
        sink.publish_fulfilled(&report.fulfilled_rows())
            .expect("fulfilled rows written");
        let output = String::from_utf8(sink.into_inner()).expect("utf8 csv");

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("Request Type,Delivered Item,Date Delivered,Household")
        );
        assert_eq!(lines.next(), Some("Food Requests?,Hot meals,2023-06-05,555-0100"));
    }

    #[test]
    fn open_rows_group_by_type_then_household() {
        let report = report();
        let rows = report.open_rows();
        let households: Vec<&str> = rows
            .iter()
            .map(|row| row.household_reference.as_str())
            .collect();
        assert_eq!(households, vec!["a", "b", "c"]);
        assert_eq!(rows[1].missed_appointment, "Yes");

        let mut sink = CsvReportSink::new(Vec::new());
        sink.publish_open(&rows).expect("open rows written");
        let output = String::from_utf8(sink.into_inner()).expect("utf8 csv");
        assert!(output
            .starts_with("Request Type,Item,Missed Appointment,Snapshot Date,Household\n"));
    }
}
