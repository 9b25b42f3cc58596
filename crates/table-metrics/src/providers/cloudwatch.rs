//! CloudWatch-backed write-capacity telemetry provider.

use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{Dimension, Statistic};
use aws_sdk_cloudwatch::Client;
use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Error, Result};
use crate::providers::{AwsProviderConfig, TelemetryProvider};
use crate::types::{CapacitySample, CapacitySeries};

const NAMESPACE: &str = "AWS/DynamoDB";
const METRIC_NAME: &str = "ConsumedWriteCapacityUnits";
const DIMENSION_TABLE_NAME: &str = "TableName";

/// Hourly `ConsumedWriteCapacityUnits` sums via `GetMetricStatistics`.
#[derive(Debug, Clone)]
pub struct CloudWatchTelemetryProvider {
    client: Client,
}

impl CloudWatchTelemetryProvider {
    /// Build a client by inheriting from the shared `SdkConfig` and
    /// applying the region/endpoint overrides.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &AwsProviderConfig) -> Self {
        let mut builder = aws_sdk_cloudwatch::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_cloudwatch::config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// Create from a pre-built client (for testing against local stacks).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_smithy_time(ts: DateTime<Utc>) -> aws_sdk_cloudwatch::primitives::DateTime {
    aws_sdk_cloudwatch::primitives::DateTime::from_millis(ts.timestamp_millis())
}

fn from_smithy_time(ts: &aws_sdk_cloudwatch::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

#[async_trait]
impl TelemetryProvider for CloudWatchTelemetryProvider {
    async fn get_capacity_series(
        &self,
        table_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_seconds: i32,
    ) -> Result<CapacitySeries> {
        let dimension = Dimension::builder()
            .name(DIMENSION_TABLE_NAME)
            .value(table_name)
            .build();

        let response = self
            .client
            .get_metric_statistics()
            .namespace(NAMESPACE)
            .metric_name(METRIC_NAME)
            .dimensions(dimension)
            .start_time(to_smithy_time(start))
            .end_time(to_smithy_time(end))
            .period(period_seconds)
            .statistics(Statistic::Sum)
            .send()
            .await
            .map_err(|e| {
                Error::Provider(format!(
                    "CloudWatch GetMetricStatistics failed for {table_name}: {e}"
                ))
            })?;

        // Datapoints arrive in no particular order; missing sums are
        // dropped rather than counted as zero-consumption buckets.
        let mut series: CapacitySeries = response
            .datapoints()
            .iter()
            .filter_map(|datapoint| {
                let timestamp = datapoint.timestamp().and_then(from_smithy_time)?;
                let consumed_units = datapoint.sum()?;
                Some(CapacitySample {
                    timestamp,
                    consumed_units,
                })
            })
            .collect();
        series.sort_by_key(|sample| sample.timestamp);

        debug!(
            "fetched {} capacity samples for table {table_name}",
            series.len()
        );
        Ok(series)
    }
}
