use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;
use table_metrics::{
    AwsProviderConfig, CloudWatchTelemetryProvider, DynamoDbMetadataProvider, MetricsCollector,
    DEFAULT_LOOKBACK_DAYS,
};

#[derive(Parser)]
#[command(name = "table-metrics-cli")]
#[command(about = "Export storage-growth metrics for DynamoDB tables to CSV")]
#[command(version)]
struct Cli {
    /// AWS region, e.g. us-west-2
    #[arg(long)]
    region: String,

    /// Specific table names to get metrics for (default: all tables)
    #[arg(long, num_args = 0..)]
    tables: Vec<String>,

    /// Output CSV file path
    #[arg(long, default_value = "dynamodb_metrics.csv")]
    output: PathBuf,

    /// Endpoint override, e.g. a LocalStack URL
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Days of capacity telemetry behind the daily averages
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    lookback_days: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let provider_config = AwsProviderConfig {
        region: Some(cli.region),
        endpoint: cli.endpoint_url,
    };

    let metadata = Arc::new(DynamoDbMetadataProvider::new(&sdk_config, &provider_config));
    let telemetry = Arc::new(CloudWatchTelemetryProvider::new(
        &sdk_config,
        &provider_config,
    ));

    let collector =
        MetricsCollector::new(metadata, telemetry).with_lookback_days(cli.lookback_days);

    let table_names = collector.resolve_table_names(&cli.tables).await?;
    info!("collecting metrics for {} tables", table_names.len());

    let records = collector.collect(&table_names).await?;
    table_metrics::report::write_csv_file(&cli.output, &records)?;

    info!("metrics written to {}", cli.output.display());
    Ok(())
}
