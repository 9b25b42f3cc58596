//! Storage-growth and write-throughput metrics for DynamoDB tables.
//!
//! Combines point-in-time `DescribeTable` statistics with a 14-day
//! window of CloudWatch `ConsumedWriteCapacityUnits` telemetry to
//! estimate each table's average daily change rate and change volume.
//! The derivation itself ([`derive`]) is a pure function; the AWS
//! providers and the [`MetricsCollector`] supply its inputs, and
//! [`report`] writes one CSV row per table.

pub mod collector;
pub mod deriver;
pub mod providers;
pub mod report;
pub mod types;

mod error;

pub use collector::MetricsCollector;
pub use deriver::{derive, DEFAULT_LOOKBACK_DAYS};
pub use error::{Error, Result};
pub use providers::cloudwatch::CloudWatchTelemetryProvider;
pub use providers::dynamodb::DynamoDbMetadataProvider;
pub use providers::{AwsProviderConfig, TableMetadataProvider, TelemetryProvider};
pub use types::{CapacitySample, CapacitySeries, DerivedMetrics, TableSnapshot};
