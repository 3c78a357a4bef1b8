use crate::cli::{
    ClassifyArgs, SchemaCheckArgs, SchemaExportArgs, SchemaSource, SnapshotArgs, SweepArgs,
};
use chrono::Local;
use request_tracker::config::AppConfig;
use request_tracker::error::AppError;
use request_tracker::workflows::requests::report::views::FulfillmentReportSummary;
use request_tracker::workflows::requests::report::{CsvReportSink, ReportSink};
use request_tracker::workflows::requests::schema::write_schema_csv;
use request_tracker::workflows::requests::{
    analyze_histories, classify, plan_timeouts, FulfillmentReport, IngestOptions, RecordError,
    SchemaModel, SnapshotSet,
};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn load_schema(source: &SchemaSource, config: &AppConfig) -> Result<SchemaModel, AppError> {
    match source
        .schema
        .as_deref()
        .or(config.analysis.schema_path.as_deref())
    {
        Some(path) => {
            info!(path = %path.display(), "using schema file");
            Ok(SchemaModel::from_path(path)?)
        }
        None => Ok(SchemaModel::standard()),
    }
}

fn read_json(path: &Path) -> Result<Value, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>, AppError> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn snapshot_dir(args: &SnapshotArgs, config: &AppConfig) -> Result<PathBuf, AppError> {
    args.snapshots
        .clone()
        .or_else(|| config.analysis.snapshot_dir.clone())
        .ok_or(AppError::MissingInput(
            "--snapshots (or SNAPSHOT_DIR) must name a snapshot directory",
        ))
}

pub(crate) fn run_classify(args: ClassifyArgs, config: &AppConfig) -> Result<(), AppError> {
    let schema = load_schema(&args.source, config)?;
    let ingest =
        IngestOptions::new(&schema).with_household_field(&config.analysis.household_field);
    let value = read_json(&args.record)?;
    let record = ingest.ingest(&value, Local::now().naive_local())?;

    let result = classify(&record, &schema);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn load_report(args: &SnapshotArgs, config: &AppConfig) -> Result<FulfillmentReport, AppError> {
    let schema = load_schema(&args.source, config)?;
    let ingest =
        IngestOptions::new(&schema).with_household_field(&config.analysis.household_field);
    let snapshots = SnapshotSet::load_dir(snapshot_dir(args, config)?, &ingest)?;
    let histories = snapshots.into_histories();

    Ok(FulfillmentReport::new(analyze_histories(&histories, &schema)))
}

pub(crate) fn run_fulfillments(args: SnapshotArgs, config: &AppConfig) -> Result<(), AppError> {
    let report = load_report(&args, config)?;
    let mut sink = CsvReportSink::new(output_writer(args.output.as_deref())?);
    sink.publish_fulfilled(&report.fulfilled_rows())?;
    sink.into_inner().flush()?;

    render_summary(&report.summary(), args.output.is_some());
    Ok(())
}

pub(crate) fn run_open_requests(args: SnapshotArgs, config: &AppConfig) -> Result<(), AppError> {
    let report = load_report(&args, config)?;
    let mut sink = CsvReportSink::new(output_writer(args.output.as_deref())?);
    sink.publish_open(&report.open_rows())?;
    sink.into_inner().flush()?;

    render_summary(&report.summary(), args.output.is_some());
    Ok(())
}

// CSV owns stdout unless it went to a file.
fn render_summary(summary: &FulfillmentReportSummary, stdout_free: bool) {
    if !stdout_free {
        info!(
            fulfilled = summary.fulfilled,
            open = summary.open,
            histories = summary.stats.histories,
            "report written"
        );
        return;
    }

    println!("Request fulfillment summary");
    println!(
        "- {} requests | {} snapshots | {} skipped (single snapshot) | {} timestamp ties",
        summary.stats.histories,
        summary.stats.snapshots,
        summary.stats.single_snapshot_histories,
        summary.stats.timestamp_ties
    );
    match summary.latest_delivery {
        Some(date) => println!(
            "- {} fulfilled | {} open | latest delivery {}",
            summary.fulfilled, summary.open, date
        ),
        None => println!("- {} fulfilled | {} open", summary.fulfilled, summary.open),
    }
    for totals in &summary.totals {
        println!(
            "  - {}: {} fulfilled | {} open ({} missed appointments)",
            totals.request_type, totals.fulfilled, totals.open, totals.missed
        );
    }
}

pub(crate) fn run_schema_export(
    args: SchemaExportArgs,
    config: &AppConfig,
) -> Result<(), AppError> {
    let model = load_schema(&args.source, config)?;
    let written = write_schema_csv(&model, output_writer(args.output.as_deref())?)?;
    debug!(rows = written, "exported schema");
    Ok(())
}

pub(crate) fn run_schema_check(args: SchemaCheckArgs) -> Result<(), AppError> {
    let schema = SchemaModel::from_path(&args.schema)?;
    let flat = schema.flatten();
    let depth = flat.iter().map(|item| item.depth + 1).max().unwrap_or(0);
    let inactive = flat.iter().filter(|item| !item.rule.active).count();

    println!("Schema {} is valid", args.schema.display());
    println!(
        "- {} categories | {} item rules | {} nesting levels | {} historical items",
        schema.schemas().len(),
        flat.len(),
        depth,
        inactive
    );
    println!("- request fields: {}", schema.request_fields().join(", "));
    println!(
        "- {} field aliases | {} tag aliases",
        schema.field_aliases().len(),
        schema.tag_aliases().len()
    );
    Ok(())
}

pub(crate) fn run_sweep_timeouts(args: SweepArgs, config: &AppConfig) -> Result<(), AppError> {
    let schema = load_schema(&args.source, config)?;
    let ingest =
        IngestOptions::new(&schema).with_household_field(&config.analysis.household_field);
    let captured = Local::now().naive_local();

    let rows = match read_json(&args.records)? {
        Value::Array(rows) => rows,
        _ => {
            return Err(AppError::MissingInput(
                "--records must hold a JSON array of records",
            ))
        }
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        match ingest.ingest(row, captured) {
            Ok(record) => records.push(record),
            Err(RecordError::MissingHousehold { field }) => {
                debug!(field = %field, "skipping record without household");
            }
            Err(other) => return Err(other.into()),
        }
    }

    let plan = plan_timeouts(&records, &schema, &args.item)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
