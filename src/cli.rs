use crate::commands::{
    run_classify, run_fulfillments, run_open_requests, run_schema_check, run_schema_export,
    run_sweep_timeouts,
};
use clap::{Args, Parser, Subcommand};
use request_tracker::config::AppConfig;
use request_tracker::error::AppError;
use request_tracker::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "request-tracker",
    about = "Classify mutual-aid requests and track fulfillments from snapshot exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the requests in a single record
    Classify(ClassifyArgs),
    /// Report items that went from open to delivered between snapshots
    Fulfillments(SnapshotArgs),
    /// List items still open in each household's latest snapshot
    OpenRequests(SnapshotArgs),
    /// Inspect the request schema
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },
    /// Plan timeouts for requests superseded by a later delivery
    SweepTimeouts(SweepArgs),
}

#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Write every item rule as a flat CSV row
    Export(SchemaExportArgs),
    /// Validate a schema file and print its shape
    Check(SchemaCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct SchemaSource {
    /// JSON or YAML schema file (defaults to REQUESTS_SCHEMA_PATH, then the built-in schema)
    #[arg(long)]
    pub(crate) schema: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// JSON file holding one record
    #[arg(long)]
    pub(crate) record: PathBuf,
    #[command(flatten)]
    pub(crate) source: SchemaSource,
}

#[derive(Args, Debug)]
pub(crate) struct SnapshotArgs {
    /// Directory of snapshot exports (defaults to SNAPSHOT_DIR)
    #[arg(long)]
    pub(crate) snapshots: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) source: SchemaSource,
    /// Write CSV rows here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SchemaExportArgs {
    #[command(flatten)]
    pub(crate) source: SchemaSource,
    /// Write CSV rows here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SchemaCheckArgs {
    /// JSON or YAML schema file to validate
    #[arg(long)]
    pub(crate) schema: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct SweepArgs {
    /// JSON file holding an array of records with ids and creation times
    #[arg(long)]
    pub(crate) records: PathBuf,
    /// Top-level request item to sweep
    #[arg(long)]
    pub(crate) item: String,
    #[command(flatten)]
    pub(crate) source: SchemaSource,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Classify(args) => run_classify(args, &config),
        Command::Fulfillments(args) => run_fulfillments(args, &config),
        Command::OpenRequests(args) => run_open_requests(args, &config),
        Command::Schema {
            command: SchemaCommand::Export(args),
        } => run_schema_export(args, &config),
        Command::Schema {
            command: SchemaCommand::Check(args),
        } => run_schema_check(args),
        Command::SweepTimeouts(args) => run_sweep_timeouts(args, &config),
    }
}
