//! Provider seams between the deriver and the AWS APIs that feed it.

pub mod cloudwatch;
pub mod dynamodb;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{CapacitySeries, TableSnapshot};

/// Shared settings for the AWS-backed providers.
///
/// Built once by the caller and applied on top of the ambient
/// `aws_config::SdkConfig`, which keeps credentials, HTTP client and
/// retry behavior shared between the two service clients.
#[derive(Debug, Clone, Default)]
pub struct AwsProviderConfig {
    /// Region override; SDK default region resolution applies when unset.
    pub region: Option<String>,
    /// Endpoint override, e.g. a LocalStack URL.
    pub endpoint: Option<String>,
}

/// Source of table discovery and point-in-time table statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableMetadataProvider: Send + Sync {
    /// Names of every table visible in the target region.
    async fn list_table_names(&self) -> Result<Vec<String>>;

    /// Current size and item count of one table. A table deleted since
    /// discovery surfaces as [`Error::TableNotFound`](crate::Error).
    async fn get_snapshot(&self, table_name: &str) -> Result<TableSnapshot>;
}

/// Source of historical consumed write-capacity telemetry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelemetryProvider: Send + Sync {
    /// Consumed write-capacity samples for `table_name` between `start`
    /// and `end`, bucketed by `period_seconds`, sorted by timestamp.
    /// Tables with no recorded activity yield an empty series, not an
    /// error.
    async fn get_capacity_series(
        &self,
        table_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_seconds: i32,
    ) -> Result<CapacitySeries>;
}
