use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryConfig {
    #[serde(rename = "start-date")]
    pub start_date: String,
    #[serde(rename = "end-date")]
    pub end_date: String,
    pub queries: Vec<QueryEntry>,
}

/// One named report query. Accepts both the short `{name, metrics, dimensions}`
/// form and the long `query-*` form; the long form lists metric dimensions
/// ahead of the other dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawQueryEntry")]
pub struct QueryEntry {
    pub name: String,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawQueryEntry {
    #[serde(alias = "query-name")]
    name: String,
    #[serde(alias = "query-metrics")]
    metrics: Vec<String>,
    dimensions: Option<Vec<String>>,
    #[serde(rename = "query-metric-dimensions")]
    metric_dimensions: Option<Vec<String>>,
    #[serde(rename = "query-other-dimensions")]
    other_dimensions: Option<Vec<String>>,
}

impl TryFrom<RawQueryEntry> for QueryEntry {
    type Error = String;

    fn try_from(raw: RawQueryEntry) -> Result<Self, Self::Error> {
        let dimensions = match (raw.dimensions, raw.metric_dimensions, raw.other_dimensions) {
            (Some(dimensions), None, None) => dimensions,
            (None, None, None) => {
                return Err(format!("missing field `dimensions` in query `{}`", raw.name));
            }
            (None, metric_dimensions, other_dimensions) => metric_dimensions
                .unwrap_or_default()
                .into_iter()
                .chain(other_dimensions.unwrap_or_default())
                .collect(),
            (Some(_), _, _) => {
                return Err(format!(
                    "query `{}` mixes `dimensions` with `query-*-dimensions` keys",
                    raw.name
                ));
            }
        };

        Ok(Self {
            name: raw.name,
            metrics: raw.metrics,
            dimensions,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetReportsRequest {
    pub report_requests: Vec<ReportRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub view_id: String,
    pub date_ranges: Vec<DateRange>,
    pub metrics: Vec<Metric>,
    pub dimensions: Vec<Dimension>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metric {
    pub expression: String,
    pub alias: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetReportsResponse {
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub column_header: ColumnHeader,
    #[serde(default)]
    pub data: ReportData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metric_header: MetricHeader,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHeader {
    #[serde(default)]
    pub metric_header_entries: Vec<MetricHeaderEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricHeaderEntry {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<DateRangeValues>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeValues {
    #[serde(default)]
    pub values: Vec<String>,
}
