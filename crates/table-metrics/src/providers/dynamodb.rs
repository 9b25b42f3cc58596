//! DynamoDB-backed table metadata provider.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::Client;
use log::debug;

use crate::error::{Error, Result};
use crate::providers::{AwsProviderConfig, TableMetadataProvider};
use crate::types::TableSnapshot;

/// Table discovery and `DescribeTable` statistics via the DynamoDB API.
#[derive(Debug, Clone)]
pub struct DynamoDbMetadataProvider {
    client: Client,
}

impl DynamoDbMetadataProvider {
    /// Build a client by inheriting from the shared `SdkConfig`
    /// (preserves credentials, HTTP client, retry config) and applying
    /// the region/endpoint overrides.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &AwsProviderConfig) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
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

    fn is_resource_not_found(err: &SdkError<DescribeTableError>) -> bool {
        match err {
            SdkError::ServiceError(service_err) => {
                matches!(
                    service_err.err(),
                    DescribeTableError::ResourceNotFoundException(_)
                )
            }
            _ => false,
        }
    }
}

#[async_trait]
impl TableMetadataProvider for DynamoDbMetadataProvider {
    async fn list_table_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut last_evaluated = None;

        loop {
            let mut request = self.client.list_tables();
            if let Some(start) = last_evaluated.take() {
                request = request.exclusive_start_table_name(start);
            }

            let response = request
                .send()
                .await
                .map_err(|e| Error::Provider(format!("DynamoDB ListTables failed: {e}")))?;

            names.extend(response.table_names().iter().cloned());

            match response.last_evaluated_table_name() {
                Some(name) => last_evaluated = Some(name.to_string()),
                None => break,
            }
        }

        debug!("discovered {} tables", names.len());
        Ok(names)
    }

    async fn get_snapshot(&self, table_name: &str) -> Result<TableSnapshot> {
        let response = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| {
                if Self::is_resource_not_found(&e) {
                    Error::TableNotFound(table_name.to_string())
                } else {
                    Error::Provider(format!(
                        "DynamoDB DescribeTable failed for {table_name}: {e}"
                    ))
                }
            })?;

        let table = response.table().ok_or_else(|| {
            Error::Provider(format!(
                "DynamoDB DescribeTable returned no description for {table_name}"
            ))
        })?;

        Ok(TableSnapshot {
            name: table_name.to_string(),
            size_bytes: table.table_size_bytes().unwrap_or(0).max(0) as u64,
            item_count: table.item_count().unwrap_or(0).max(0) as u64,
        })
    }
}
