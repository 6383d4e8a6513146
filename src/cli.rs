use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ga-etl",
    version,
    about = "Export Google Analytics reports to CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Export(ExportArgs),
    Plan(PlanArgs),
    Flatten(FlattenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, default_value = "credentials.json")]
    pub credentials_path: PathBuf,

    #[arg(long, default_value = "Query.json")]
    pub query_path: PathBuf,

    #[arg(long, default_value = "reports")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = crate::query::DEFAULT_VIEW_ID)]
    pub view_id: String,

    #[arg(long, default_value = crate::reporting::APPLICATION_NAME)]
    pub application_name: String,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, default_value = "Query.json")]
    pub query_path: PathBuf,

    #[arg(long, default_value = crate::query::DEFAULT_VIEW_ID)]
    pub view_id: String,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FlattenArgs {
    #[arg(long)]
    pub response_path: PathBuf,

    #[arg(long, default_value = "reports")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub prefix: String,
}
