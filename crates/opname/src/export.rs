//! Stock-opname CSV report.
//!
//! Plain comma-separated values, no quoting: the ledger's names, SKUs and
//! locations are not expected to contain commas.

use std::path::{Path, PathBuf};

use anyhow::Context;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use gudang_inventory::StockOpnameRecord;

pub const REPORT_FILE_NAME: &str = "stock_opname_report.csv";

pub const REPORT_HEADER: [&str; 7] = [
    "Name",
    "SKU",
    "Quantity",
    "System Stock",
    "Discrepancy",
    "Location",
    "Last Updated",
];

const MISSING_LOCATION: &str = "N/A";

/// Date format of the "Last Updated" column (UTC calendar date).
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write report row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to finish report: {0}")]
    Finish(String),

    #[error("failed to deliver report: {0:#}")]
    Delivery(anyhow::Error),
}

/// Render the report for `records`, one row each, in the given order.
///
/// The "System Stock" and "Discrepancy" cells stay empty for a record that
/// has never been counted.
pub fn build_report<'a, I>(records: I) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a StockOpnameRecord>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(REPORT_HEADER)?;

    for record in records {
        let real_stock = record.real_stock();
        let system = record.system_quantity();

        writer.write_record([
            record.tool_name().to_string(),
            record.sku().to_string(),
            system.to_string(),
            real_stock.map(|v| v.to_string()).unwrap_or_default(),
            real_stock
                .map(|v| gudang_inventory::opname::discrepancy(v, system).to_string())
                .unwrap_or_default(),
            record.location().unwrap_or(MISSING_LOCATION).to_string(),
            record
                .date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Finish(e.to_string()))
}

/// Hands a finished report to the user (download, save dialog, ...).
pub trait ReportSink: Send + Sync {
    fn deliver(&self, file_name: &str, contents: &[u8]) -> anyhow::Result<()>;
}

/// Writes reports into a directory, replacing any previous file of the same name.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileSink {
    fn deliver(&self, file_name: &str, contents: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create report directory at {:?}", self.dir))?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write report to {:?}", path))?;

        tracing::info!(path = %path.display(), bytes = contents.len(), "report written");
        Ok(())
    }
}
