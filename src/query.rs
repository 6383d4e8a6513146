use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::model::{
    DateRange, Dimension, GetReportsRequest, Metric, QueryConfig, QueryEntry, ReportRequest,
};

pub const NAMESPACE: &str = "ga:";
pub const DEFAULT_VIEW_ID: &str = "150721365";

/// Prefixes `name` with the reporting namespace unless it already carries it.
pub fn namespaced(name: &str) -> String {
    if name.starts_with(NAMESPACE) {
        name.to_string()
    } else {
        format!("{NAMESPACE}{name}")
    }
}

/// Builds one batched request per query entry, keyed by query name in config
/// order. A repeated name replaces the earlier request in its original slot.
pub fn build_queries(config: &QueryConfig, view_id: &str) -> IndexMap<String, GetReportsRequest> {
    let date_range = DateRange {
        start_date: config.start_date.clone(),
        end_date: config.end_date.clone(),
    };

    info!(
        start_date = %date_range.start_date,
        end_date = %date_range.end_date,
        "setting date range"
    );

    let mut requests = IndexMap::with_capacity(config.queries.len());
    for entry in &config.queries {
        let request = build_request(entry, &date_range, view_id);
        if requests.insert(entry.name.clone(), request).is_some() {
            warn!(query = %entry.name, "duplicate query name, later entry wins");
        }
    }

    requests
}

fn build_request(entry: &QueryEntry, date_range: &DateRange, view_id: &str) -> GetReportsRequest {
    let metrics = entry
        .metrics
        .iter()
        .map(|name| Metric {
            expression: namespaced(name),
            alias: name.strip_prefix(NAMESPACE).unwrap_or(name).to_string(),
        })
        .collect::<Vec<_>>();

    let dimensions = entry
        .dimensions
        .iter()
        .map(|name| Dimension {
            name: namespaced(name),
        })
        .collect::<Vec<_>>();

    debug!(
        query = %entry.name,
        metrics = ?metrics.iter().map(|m| m.expression.as_str()).collect::<Vec<_>>(),
        dimensions = ?dimensions.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        "creating report request"
    );

    GetReportsRequest {
        report_requests: vec![ReportRequest {
            view_id: namespaced(view_id),
            date_ranges: vec![date_range.clone()],
            metrics,
            dimensions,
        }],
    }
}
