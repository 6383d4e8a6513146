use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::model::QueryConfig;
use crate::reporting::ServiceAccountKey;
use crate::util::read_json;

/// Result of looking for an input file that the caller may or may not need.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    Loaded(T),
    NotFound(PathBuf),
}

pub fn load_query(path: &Path) -> Result<LoadOutcome<QueryConfig>> {
    load_json_file(path)
}

pub fn load_credentials(path: &Path) -> Result<LoadOutcome<ServiceAccountKey>> {
    load_json_file(path)
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<LoadOutcome<T>> {
    if !path.is_file() {
        warn!(path = %path.display(), "file does not exist");
        return Ok(LoadOutcome::NotFound(path.to_path_buf()));
    }

    info!(path = %path.display(), "loading");
    read_json(path).map(LoadOutcome::Loaded)
}
