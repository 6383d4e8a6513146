use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::PlanArgs;
use crate::config::{LoadOutcome, load_query};
use crate::query::build_queries;
use crate::util::write_json_pretty;

pub fn run(args: PlanArgs) -> Result<()> {
    let config = match load_query(&args.query_path)? {
        LoadOutcome::Loaded(config) => config,
        LoadOutcome::NotFound(path) => bail!("query config not found: {}", path.display()),
    };

    let requests = build_queries(&config, &args.view_id);

    match args.output {
        Some(path) => {
            write_json_pretty(&path, &requests)?;
            info!(path = %path.display(), query_count = requests.len(), "wrote request plan");
        }
        None => {
            let mut output = io::BufWriter::new(io::stdout().lock());
            serde_json::to_writer_pretty(&mut output, &requests)
                .context("failed to serialize request plan")?;
            writeln!(output)?;
            output.flush()?;
        }
    }

    Ok(())
}
