// src/io/reporting.rs

use crate::error::SimResult;
use crate::simulation::batch::BatchRow;
use crate::simulation::runner::RunSummary;
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use std::path::Path;

/// Writes one row per server count, one quoted column per repetition, no header.
pub fn write_revenue_table<P: AsRef<Path>>(file_path: P, rows: &[BatchRow]) -> SimResult<()> {
    let path = file_path.as_ref();
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;

    for row in rows {
        wtr.write_record(row.net_revenues.iter().map(|value| value.to_string()))?;
    }
    wtr.flush()?;

    info!("Exported {} revenue rows to '{}'", rows.len(), path.display());
    Ok(())
}

/// Writes one serialized summary per run, with a header row.
pub fn write_run_summaries<P: AsRef<Path>>(file_path: P, data: &[RunSummary]) -> SimResult<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!("Exported {} run summaries to '{}'", data.len(), path.display());
    Ok(())
}
