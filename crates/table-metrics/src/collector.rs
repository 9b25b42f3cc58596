use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{error, info, warn};

use crate::deriver::{derive, DEFAULT_LOOKBACK_DAYS};
use crate::error::{Error, Result};
use crate::providers::{TableMetadataProvider, TelemetryProvider};
use crate::types::DerivedMetrics;

/// Telemetry aggregation bucket width, in seconds.
const CAPACITY_PERIOD_SECONDS: i32 = 3600;

/// Drives one metrics run: resolves the table list, fetches metadata
/// and telemetry per table, and derives one record per table.
///
/// A table that resolves to not-found is logged and skipped; any other
/// provider failure aborts the run. Records come back in table
/// iteration order.
pub struct MetricsCollector {
    metadata: Arc<dyn TableMetadataProvider>,
    telemetry: Arc<dyn TelemetryProvider>,
    lookback_days: u32,
}

impl MetricsCollector {
    pub fn new(
        metadata: Arc<dyn TableMetadataProvider>,
        telemetry: Arc<dyn TelemetryProvider>,
    ) -> Self {
        Self {
            metadata,
            telemetry,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Resolve the tables to report on: the explicit list when one was
    /// given, otherwise every table the metadata provider can see.
    pub async fn resolve_table_names(&self, explicit: &[String]) -> Result<Vec<String>> {
        if explicit.is_empty() {
            self.metadata.list_table_names().await
        } else {
            Ok(explicit.to_vec())
        }
    }

    /// Derive metrics for every named table.
    pub async fn collect(&self, table_names: &[String]) -> Result<Vec<DerivedMetrics>> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(self.lookback_days));

        let mut records = Vec::with_capacity(table_names.len());
        for table_name in table_names {
            match self.collect_one(table_name, start, end).await {
                Ok(metrics) => records.push(metrics),
                Err(Error::TableNotFound(name)) => {
                    warn!("table {name} not found, skipping");
                }
                Err(e) => {
                    error!("error getting metrics for table {table_name}: {e}");
                    return Err(e);
                }
            }
        }

        info!(
            "derived metrics for {} of {} tables",
            records.len(),
            table_names.len()
        );
        Ok(records)
    }

    async fn collect_one(
        &self,
        table_name: &str,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> Result<DerivedMetrics> {
        let snapshot = self.metadata.get_snapshot(table_name).await?;
        let series = self
            .telemetry
            .get_capacity_series(table_name, start, end, CAPACITY_PERIOD_SECONDS)
            .await?;
        Ok(derive(&snapshot, &series, self.lookback_days))
    }
}
