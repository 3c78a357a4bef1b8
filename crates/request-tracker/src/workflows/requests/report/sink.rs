use super::views::{FulfilledRequestRow, OpenRequestRow};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush report output: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for report rows. The spreadsheet upload implements this
/// outside the crate; the CLI writes CSV.
pub trait ReportSink {
    fn publish_fulfilled(&mut self, rows: &[FulfilledRequestRow]) -> Result<(), ReportError>;
    fn publish_open(&mut self, rows: &[OpenRequestRow]) -> Result<(), ReportError>;
}

/// Writes each published batch as CSV with a header row.
#[derive(Debug)]
pub struct CsvReportSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_rows<T: Serialize>(&mut self, rows: &[T]) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(&mut self.writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    fn publish_fulfilled(&mut self, rows: &[FulfilledRequestRow]) -> Result<(), ReportError> {
        self.write_rows(rows)
    }

    fn publish_open(&mut self, rows: &[OpenRequestRow]) -> Result<(), ReportError> {
        self.write_rows(rows)
    }
}
