use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::cli::FlattenArgs;
use crate::flatten::write_csv;
use crate::model::GetReportsResponse;
use crate::util::read_json;

pub fn run(args: FlattenArgs) -> Result<()> {
    let response: GetReportsResponse = read_json(&args.response_path)?;
    info!(
        path = %args.response_path.display(),
        reports = response.reports.len(),
        "loaded saved response"
    );

    if let Some(path) = write_csv(&response, &args.output_dir, &args.prefix, Local::now())? {
        info!(path = %path.display(), "flatten completed");
    }

    Ok(())
}
