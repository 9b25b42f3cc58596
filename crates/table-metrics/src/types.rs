use chrono::{DateTime, Utc};
use serde::Serialize;

/// Point-in-time read of a table's stored size and row count.
///
/// DynamoDB reports both values as optional signed integers; providers
/// clamp missing or negative values to zero before constructing this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub name: String,
    pub size_bytes: u64,
    pub item_count: u64,
}

/// One hourly bucket of consumed write-capacity units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacitySample {
    pub timestamp: DateTime<Utc>,
    pub consumed_units: f64,
}

/// Consumed write-capacity samples over the lookback window, ordered by
/// timestamp ascending. May be empty for idle or brand-new tables.
pub type CapacitySeries = Vec<CapacitySample>;

/// Derived storage-growth metrics for one table.
///
/// Field order matches the CSV column order; `avg_daily_change_rate`
/// keeps the unformatted ratio and is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    #[serde(rename = "TableName")]
    pub table_name: String,
    #[serde(rename = "TableSizeBytes")]
    pub size_bytes: u64,
    #[serde(rename = "ItemCount")]
    pub item_count: u64,
    #[serde(rename = "AvgItemSizeBytes")]
    pub avg_item_size_bytes: f64,
    #[serde(rename = "AvgDailyWCU")]
    pub avg_daily_write_units: f64,
    #[serde(rename = "AvgDailyChangeRate")]
    pub avg_daily_change_rate_percent: String,
    #[serde(rename = "AvgDailyChangeBytes")]
    pub avg_daily_change_bytes: f64,
    /// Unformatted daily change ratio (0.1367 for "13.67%").
    #[serde(skip)]
    pub avg_daily_change_rate: f64,
}

impl DerivedMetrics {
    /// CSV column headers, in output order.
    pub const CSV_HEADERS: [&'static str; 7] = [
        "TableName",
        "TableSizeBytes",
        "ItemCount",
        "AvgItemSizeBytes",
        "AvgDailyWCU",
        "AvgDailyChangeRate",
        "AvgDailyChangeBytes",
    ];
}
