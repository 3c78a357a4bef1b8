mod classifier;
pub mod domain;
mod fulfillment;
mod record;
pub mod report;
pub mod schema;
mod snapshot;
mod sweep;

pub use classifier::classify;
pub use domain::{
    ClassificationResult, FieldStatuses, FulfillmentEvent, OpenRequest, RequestBucket,
};
pub use fulfillment::{
    analyze_histories, detect_fulfillments, open_requests, AnalysisStats, FulfillmentAnalysis,
    RequestHistory,
};
pub use record::{IngestOptions, Record, RecordError};
pub use report::FulfillmentReport;
pub use schema::{ItemRule, RequestSchema, SchemaError, SchemaItem, SchemaModel};
pub use snapshot::{snapshot_time, SnapshotError, SnapshotSet};
pub use sweep::{plan_timeouts, SweepError, SweepPlan, SweepStats, TimeoutUpdate};
