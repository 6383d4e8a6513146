use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::model::{GetReportsResponse, Report, ReportRow};
use crate::util::report_timestamp;

pub const CSV_TAG: &str = "GA-BIOREGISTRA-";
const SEPARATOR: &str = ", ";

pub fn csv_file_name(prefix: &str, ts: DateTime<Local>) -> String {
    format!("{prefix}-{CSV_TAG}{}.csv", report_timestamp(ts))
}

/// Writes every report of `response` into one CSV file under `destination_dir`.
///
/// Returns `Ok(None)` without touching the filesystem when the directory does
/// not exist. Reports without rows are skipped; the remaining reports are
/// appended one after another. Each line is flushed as soon as it is written.
pub fn write_csv(
    response: &GetReportsResponse,
    destination_dir: &Path,
    prefix: &str,
    ts: DateTime<Local>,
) -> Result<Option<PathBuf>> {
    if !destination_dir.is_dir() {
        warn!(path = %destination_dir.display(), "destination directory does not exist");
        return Ok(None);
    }

    let csv_path = destination_dir.join(csv_file_name(prefix, ts));
    let file = File::create(&csv_path)
        .with_context(|| format!("failed to create {}", csv_path.display()))?;
    let mut writer = BufWriter::new(file);

    info!(path = %csv_path.display(), "generating csv");

    for (index, report) in response.reports.iter().enumerate() {
        if report.data.rows.is_empty() {
            info!(report = index, "no data found");
            continue;
        }

        if let Some(token) = &report.next_page_token {
            warn!(
                report = index,
                next_page_token = %token,
                rows_written = report.data.rows.len(),
                row_count = report.data.row_count.unwrap_or_default(),
                "report has further pages that are not fetched"
            );
        }

        write_line(&mut writer, &header_line(report), &csv_path)?;
        for row in &report.data.rows {
            write_line(&mut writer, &row_line(report, row), &csv_path)?;
        }
    }

    info!(path = %csv_path.display(), "csv written");
    Ok(Some(csv_path))
}

fn write_line(writer: &mut impl Write, line: &str, path: &Path) -> Result<()> {
    writeln!(writer, "{line}").with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

/// Dimension names lose their namespace (everything up to the first `:`).
/// With dimensions present the metric names always follow a separator, even
/// when there are none.
pub fn header_line(report: &Report) -> String {
    let header = &report.column_header;
    let metrics = header
        .metric_header
        .metric_header_entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    if header.dimensions.is_empty() {
        return metrics;
    }

    let dimensions = header
        .dimensions
        .iter()
        .map(|name| strip_namespace(name))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    format!("{dimensions}{SEPARATOR}{metrics}")
}

pub fn row_line(report: &Report, row: &ReportRow) -> String {
    let dimension_count = report.column_header.dimensions.len();
    let metric_count = report.column_header.metric_header.metric_header_entries.len();

    let dimensions = row.dimensions.iter().take(dimension_count);
    let metrics = row
        .metrics
        .iter()
        .flat_map(|set| set.values.iter().take(metric_count));

    dimensions
        .chain(metrics)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn strip_namespace(name: &str) -> &str {
    name.split_once(':').map_or(name, |(_, rest)| rest)
}
